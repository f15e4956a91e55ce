//! Error types for the boundaries around the simulation
//!
//! The physics step itself cannot fail. Everything here originates in a
//! collaborator (storage, audio, config files) or in a host asking the
//! session for a transition its current mode does not allow.

use thiserror::Error;

use crate::sim::RunMode;

/// A state machine transition requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Pause,
    Resume,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Start => write!(f, "start"),
            Transition::Pause => write!(f, "pause"),
            Transition::Resume => write!(f, "resume"),
        }
    }
}

/// Transition rejected; the session was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while {from:?}")]
pub struct TransitionError {
    pub action: Transition,
    pub from: RunMode,
}

/// Key-value storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
    #[error("storage i/o failed")]
    Io(#[from] std::io::Error),
    #[error("malformed stored value")]
    Format(#[from] serde_json::Error),
}

/// Audio playback failures (always swallowed by the frame driver)
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// GPU setup failures (the host logs these and runs without drawing)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create GPU device")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
}

/// Invalid or unreadable tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("block grid must have at least one row and one column")]
    EmptyGrid,
    #[error("block grid extends past the board ({right} x {bottom})")]
    GridOutOfBounds { right: f32, bottom: f32 },
    #[error("paddle does not fit on the board")]
    PaddleOutOfBounds,
    #[error("could not read tuning file")]
    Io(#[from] std::io::Error),
    #[error("could not parse tuning")]
    Parse(#[from] serde_json::Error),
}
