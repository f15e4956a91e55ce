//! Brick Breaker - a paddle, a ball and a wall of blocks
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, session state machine)
//! - `game`: Frame driver wiring the session to its collaborators
//! - `renderer`: Render surface abstraction and WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (storage, input)
//! - `persistence`: Highscore load/save with corruption fallback
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AudioError, RenderError, StorageError, TransitionError, TuningError};
pub use game::{FrameOutcome, Game, Schedule};
pub use highscores::Highscore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 620.0;
    pub const BOARD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Horizontal speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Gap between the paddle and the bottom edge of the board
    pub const PADDLE_BOTTOM_MARGIN: f32 = 5.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Ball speed (pixels per tick), restored on every paddle bounce
    pub const BALL_SPEED: f32 = 4.0;
    /// Maximum paddle deflection from vertical (60 degrees)
    pub const MAX_DEFLECTION: f32 = std::f32::consts::FRAC_PI_3;

    /// Block grid defaults
    pub const BLOCK_WIDTH: f32 = 50.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const BLOCK_COLUMNS: u32 = 10;
    pub const BLOCK_ROWS: u32 = 3;
    pub const BLOCK_ORIGIN_X: f32 = 15.0;
    pub const BLOCK_ORIGIN_Y: f32 = 45.0;
    pub const BLOCK_SPACING: f32 = 10.0;

    /// Points per destroyed block
    pub const BLOCK_REWARD: u32 = 10;
    /// Score at which cleared boards stop regenerating
    pub const MAX_SCORE: u32 = 50_000;
}
