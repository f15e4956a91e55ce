//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, files on native)
//! - Input events (keys and on-screen buttons to intents)

pub mod input;
pub mod storage;

pub use input::{Direction, apply_key, direction_for_key, set_direction};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
