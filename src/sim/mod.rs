//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per `tick()` call, velocities in pixels per tick
//! - Stable iteration order (row-major blocks)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{paddle_bounce_velocity, paddle_contact, reflect_off_walls};
pub use rect::{Rect, overlaps};
pub use state::{Ball, Block, BlockColor, BlockGrid, GameEvent, Paddle, RunMode, Session};
pub use tick::{InputIntent, tick};
