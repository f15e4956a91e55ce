//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Missing JSON fields fall back
//! to the defaults in [`crate::consts`], so a tuning file only needs to name
//! what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels per tick
    pub paddle_speed: f32,
    pub paddle_bottom_margin: f32,

    // === Ball ===
    pub ball_size: f32,
    /// Pixels per tick
    pub ball_speed: f32,
    /// Largest deflection from vertical on a paddle edge hit (radians)
    pub max_deflection: f32,
    /// Snap the ball onto the paddle top after a bounce (prevents double bounces)
    pub snap_ball_to_paddle: bool,

    // === Blocks ===
    pub block_width: f32,
    pub block_height: f32,
    pub block_columns: u32,
    pub block_rows: u32,
    pub block_origin_x: f32,
    pub block_origin_y: f32,
    pub block_spacing: f32,

    // === Scoring ===
    pub block_reward: u32,
    pub max_score: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            max_deflection: MAX_DEFLECTION,
            snap_ball_to_paddle: true,

            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_columns: BLOCK_COLUMNS,
            block_rows: BLOCK_ROWS,
            block_origin_x: BLOCK_ORIGIN_X,
            block_origin_y: BLOCK_ORIGIN_Y,
            block_spacing: BLOCK_SPACING,

            block_reward: BLOCK_REWARD,
            max_score: MAX_SCORE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of blocks in a fresh grid
    pub fn block_count(&self) -> usize {
        (self.block_rows as usize).saturating_mul(self.block_columns as usize)
    }

    /// Check that the values describe a playable board
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("max_deflection", self.max_deflection),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }

        if self.block_rows == 0 || self.block_columns == 0 {
            return Err(TuningError::EmptyGrid);
        }

        let right = self.block_origin_x
            + self.block_columns as f32 * (self.block_width + self.block_spacing)
            - self.block_spacing;
        let bottom = self.block_origin_y
            + self.block_rows as f32 * (self.block_height + self.block_spacing)
            - self.block_spacing;
        if self.block_origin_x < 0.0
            || self.block_origin_y < 0.0
            || right > self.board_width
            || bottom > self.board_height
        {
            return Err(TuningError::GridOutOfBounds { right, bottom });
        }

        if self.paddle_width > self.board_width
            || self.paddle_height + self.paddle_bottom_margin > self.board_height
        {
            return Err(TuningError::PaddleOutOfBounds);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.block_count(), 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "block_rows": 5, "ball_speed": 6.0 }"#).unwrap();
        assert_eq!(tuning.block_rows, 5);
        assert_eq!(tuning.ball_speed, 6.0);
        assert_eq!(tuning.board_width, BOARD_WIDTH);
        assert_eq!(tuning.block_count(), 50);
    }

    #[test]
    fn test_rejects_non_positive() {
        let tuning = Tuning {
            ball_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { field: "ball_speed" })
        ));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let tuning = Tuning {
            block_columns: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::EmptyGrid)));
    }

    #[test]
    fn test_rejects_grid_wider_than_board() {
        let tuning = Tuning {
            block_columns: 11,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GridOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_block_count_of_huge_grid_does_not_overflow() {
        let tuning = Tuning {
            block_rows: 70_000,
            block_columns: 70_000,
            ..Default::default()
        };
        assert_eq!(tuning.block_count(), 70_000_usize.saturating_mul(70_000));
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GridOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
