//! Game state and core simulation types
//!
//! The [`Session`] owns every mutable entity. Hosts read it for rendering and
//! drive it through [`super::tick`] and the transition methods below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::{Transition, TransitionError, TuningError};
use crate::highscores::Highscore;
use crate::tuning::Tuning;

/// Run mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Waiting for the first start
    Idle,
    /// Active gameplay
    Running,
    /// Simulation frozen, resumable
    Paused,
    /// Ball fell out; needs an explicit restart
    Ended,
}

impl RunMode {
    /// Whether `start()` is allowed from this mode
    pub fn can_start(self) -> bool {
        matches!(self, RunMode::Idle | RunMode::Ended)
    }
}

/// Notable things that happened since the last drain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PaddleHit,
    BlockDestroyed { row: u32, column: u32, score: u32 },
    /// Board cleared below the max score; a fresh grid was dealt
    RoundCleared { round: u32 },
    /// Last block destroyed at or above the max score; the board stays empty
    MaxScoreReached { score: u32 },
    GameOver { score: u32 },
    /// The host should ask for a name and call `submit_highscore_name`
    HighscoreBeaten { score: u32 },
}

/// Cosmetic block color tag, assigned per row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Blue,
    Red,
    Gold,
    Purple,
    Pink,
    Lime,
    Green,
    Orange,
}

impl BlockColor {
    pub const PALETTE: [BlockColor; 8] = [
        BlockColor::Blue,
        BlockColor::Red,
        BlockColor::Gold,
        BlockColor::Purple,
        BlockColor::Pink,
        BlockColor::Lime,
        BlockColor::Green,
        BlockColor::Orange,
    ];

    pub fn for_row(row: u32) -> Self {
        Self::PALETTE[row as usize % Self::PALETTE.len()]
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered horizontally, resting above the bottom margin
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.board_width / 2.0 - tuning.paddle_width / 2.0,
                tuning.board_height - tuning.paddle_height - tuning.paddle_bottom_margin,
            ),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(self.width, self.height),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Step left unless the step would leave the board
    pub fn move_left(&mut self) {
        if self.pos.x - self.speed >= 0.0 {
            self.pos.x -= self.speed;
        }
    }

    /// Step right unless the step would leave the board
    pub fn move_right(&mut self, board_width: f32) {
        if self.pos.x + self.width + self.speed <= board_width {
            self.pos.x += self.speed;
        }
    }
}

/// The ball (a square of side `size`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// Ball at the board center heading straight up
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.board_width / 2.0, tuning.board_height / 2.0),
            vel: Vec2::new(0.0, -tuning.ball_speed),
            size: tuning.ball_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(self.size),
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }
}

/// A block entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub row: u32,
    pub column: u32,
    pub color: BlockColor,
    pub destroyed: bool,
}

/// Blocks laid out row-major, rows from the top
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockGrid {
    blocks: Vec<Block>,
}

impl BlockGrid {
    /// Grid with no blocks (before the first start)
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh grid of `rows x columns` standing blocks
    pub fn generate(tuning: &Tuning) -> Self {
        let mut blocks = Vec::with_capacity(tuning.block_count());
        for row in 0..tuning.block_rows {
            for column in 0..tuning.block_columns {
                let x = column as f32 * (tuning.block_width + tuning.block_spacing)
                    + tuning.block_origin_x;
                let y = row as f32 * (tuning.block_height + tuning.block_spacing)
                    + tuning.block_origin_y;
                blocks.push(Block {
                    rect: Rect::new(x, y, tuning.block_width, tuning.block_height),
                    row,
                    column,
                    color: BlockColor::for_row(row),
                    destroyed: false,
                });
            }
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks still standing
    pub fn remaining(&self) -> usize {
        self.blocks.iter().filter(|b| !b.destroyed).count()
    }

    /// True when every block is destroyed (vacuously true for an empty grid)
    pub fn all_destroyed(&self) -> bool {
        self.blocks.iter().all(|b| b.destroyed)
    }
}

/// Complete mutable state of one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub tuning: Tuning,
    pub paddle: Paddle,
    pub ball: Ball,
    pub blocks: BlockGrid,
    pub score: u32,
    /// Best score so far, shared with the persistence layer
    pub highscore: Highscore,
    pub mode: RunMode,
    /// Current round (1-based once started)
    pub round: u32,
    /// Ticks simulated since the last start
    pub time_ticks: u64,
    /// Beaten score waiting for a name
    pending_highscore: Option<u32>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Session {
    /// Idle session; the grid is dealt on `start()`.
    ///
    /// The tuning is validated first, so every session has a non-empty grid
    /// that fits the board.
    pub fn new(tuning: Tuning, highscore: Highscore) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            paddle: Paddle::new(&tuning),
            ball: Ball::new(&tuning),
            blocks: BlockGrid::empty(),
            score: 0,
            highscore,
            mode: RunMode::Idle,
            round: 0,
            time_ticks: 0,
            pending_highscore: None,
            events: Vec::new(),
            tuning,
        })
    }

    /// The play area
    pub fn board(&self) -> Rect {
        Rect::new(0.0, 0.0, self.tuning.board_width, self.tuning.board_height)
    }

    /// Begin a new play-through (from Idle or Ended)
    pub fn start(&mut self) -> Result<(), TransitionError> {
        if !self.mode.can_start() {
            return Err(TransitionError {
                action: Transition::Start,
                from: self.mode,
            });
        }

        self.score = 0;
        self.round = 1;
        self.time_ticks = 0;
        self.blocks = BlockGrid::generate(&self.tuning);
        self.reset_ball_and_paddle();
        self.mode = RunMode::Running;
        self.push_event(GameEvent::Started);
        Ok(())
    }

    /// Freeze the simulation
    pub fn pause(&mut self) -> Result<(), TransitionError> {
        if self.mode != RunMode::Running {
            return Err(TransitionError {
                action: Transition::Pause,
                from: self.mode,
            });
        }
        self.mode = RunMode::Paused;
        self.push_event(GameEvent::Paused);
        Ok(())
    }

    /// Unfreeze the simulation
    pub fn resume(&mut self) -> Result<(), TransitionError> {
        if self.mode != RunMode::Paused {
            return Err(TransitionError {
                action: Transition::Resume,
                from: self.mode,
            });
        }
        self.mode = RunMode::Running;
        self.push_event(GameEvent::Resumed);
        Ok(())
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) -> Result<(), TransitionError> {
        match self.mode {
            RunMode::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Center the paddle and put the ball back at the board center heading up
    pub fn reset_ball_and_paddle(&mut self) {
        self.paddle = Paddle::new(&self.tuning);
        self.ball = Ball::new(&self.tuning);
    }

    /// Deal a fresh grid mid-session and reset the ball and paddle
    pub fn next_round(&mut self) {
        self.blocks = BlockGrid::generate(&self.tuning);
        self.reset_ball_and_paddle();
        self.round += 1;
        self.push_event(GameEvent::RoundCleared { round: self.round });
    }

    /// Ball fell out of the board: finalize the score
    pub fn end_game(&mut self) {
        self.mode = RunMode::Ended;
        self.push_event(GameEvent::GameOver { score: self.score });

        if self.highscore.beaten_by(self.score) {
            self.pending_highscore = Some(self.score);
            self.push_event(GameEvent::HighscoreBeaten { score: self.score });
        }
    }

    /// Score waiting for a name, if any
    pub fn pending_highscore(&self) -> Option<u32> {
        self.pending_highscore
    }

    /// Resolve a pending highscore with the player's name.
    ///
    /// Missing or blank names get the default label. Returns the new record so
    /// the caller can persist it, or `None` when nothing was pending.
    pub fn submit_highscore_name(&mut self, name: Option<&str>) -> Option<Highscore> {
        let score = self.pending_highscore.take()?;
        let record = Highscore::named(name, score);
        self.highscore = record.clone();
        Some(record)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
