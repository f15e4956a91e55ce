//! Frame driver
//!
//! [`Game`] ties a [`Session`] to its collaborators: the key-value store that
//! keeps the highscore and settings, the background music, and the current
//! input intent. Hosts call [`Game::frame`] once per animation frame and stop
//! scheduling when it answers [`Schedule::Halt`]; `start` and `resume` are the
//! only ways back into the loop.

use crate::audio::MusicPlayer;
use crate::error::{TransitionError, TuningError};
use crate::highscores::Highscore;
use crate::persistence::{load_highscore, save_highscore};
use crate::platform::KeyValueStore;
use crate::renderer::{RenderSurface, draw_session};
use crate::settings::Settings;
use crate::sim::{GameEvent, InputIntent, RunMode, Session, tick};
use crate::tuning::Tuning;

/// Whether the host should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    NextFrame,
    Halt,
}

/// Result of one driven frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub schedule: Schedule,
    /// Events queued since the previous frame, in order
    pub events: Vec<GameEvent>,
}

/// A session plus everything it talks to
pub struct Game<S: KeyValueStore, M: MusicPlayer> {
    session: Session,
    storage: S,
    music: M,
    settings: Settings,
    input: InputIntent,
}

impl<S: KeyValueStore, M: MusicPlayer> Game<S, M> {
    /// Load the stored highscore and settings and build an idle session.
    ///
    /// Fails only when the tuning does not describe a playable board.
    pub fn new(tuning: Tuning, storage: S, mut music: M) -> Result<Self, TuningError> {
        let highscore = load_highscore(&storage);
        let session = Session::new(tuning, highscore)?;
        let settings = Settings::load(&storage);
        music.set_volume(settings.effective_music_volume());

        Ok(Self {
            session,
            storage,
            music,
            settings,
            input: InputIntent::default(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn music(&self) -> &M {
        &self.music
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings, persist them and apply the volume
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.music.set_volume(self.settings.effective_music_volume());
        if let Err(e) = self.settings.save(&mut self.storage) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn input(&self) -> InputIntent {
        self.input
    }

    pub fn input_mut(&mut self) -> &mut InputIntent {
        &mut self.input
    }

    pub fn set_input(&mut self, input: InputIntent) {
        self.input = input;
    }

    /// Begin a new play-through.
    ///
    /// An unanswered highscore request from the previous game is settled with
    /// the default name first.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        if self.session.pending_highscore().is_some() {
            self.submit_highscore_name(None);
        }

        self.session.start()?;
        self.input = InputIntent::default();
        self.play_music();
        log::info!("Game started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.session.pause()?;
        self.music.pause();
        log::info!("Game paused at score {}", self.session.score);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.session.resume()?;
        self.play_music();
        log::info!("Game resumed");
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), TransitionError> {
        match self.session.mode {
            RunMode::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Run one tick and draw the result.
    ///
    /// Outside Running nothing is simulated or drawn and the loop halts.
    pub fn frame(&mut self, surface: &mut impl RenderSurface) -> FrameOutcome {
        if self.session.mode != RunMode::Running {
            return FrameOutcome {
                schedule: Schedule::Halt,
                events: self.session.drain_events(),
            };
        }

        tick(&mut self.session, &self.input);
        draw_session(&self.session, surface);

        let events = self.session.drain_events();
        for event in &events {
            match event {
                GameEvent::GameOver { score } => {
                    self.music.pause();
                    log::info!("Game over with score {score}");
                }
                GameEvent::RoundCleared { round } => log::info!("Round {round} dealt"),
                GameEvent::MaxScoreReached { score } => {
                    log::info!("Max score reached at {score}")
                }
                _ => {}
            }
        }

        let schedule = if self.session.mode == RunMode::Running {
            Schedule::NextFrame
        } else {
            Schedule::Halt
        };
        FrameOutcome { schedule, events }
    }

    /// Draw without simulating (start screen, paused overlay)
    pub fn draw(&self, surface: &mut impl RenderSurface) {
        draw_session(&self.session, surface);
    }

    /// Name the pending highscore and persist it.
    ///
    /// Save failures are logged; the in-memory record is updated either way.
    pub fn submit_highscore_name(&mut self, name: Option<&str>) -> Option<Highscore> {
        let record = self.session.submit_highscore_name(name)?;
        if let Err(e) = save_highscore(&mut self.storage, &record) {
            log::error!("Failed to save highscore: {e}");
        }
        Some(record)
    }

    fn play_music(&mut self) {
        if self.settings.muted {
            return;
        }
        if let Err(e) = self.music.play() {
            log::warn!("Music playback failed: {e}");
        }
    }
}
