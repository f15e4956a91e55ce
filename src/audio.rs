//! Background music
//!
//! The game only needs a looping track that starts with a session, stops on
//! pause and game over, and picks up again on resume. Playback failures are
//! returned to the frame driver, which logs and ignores them.

use crate::error::AudioError;

/// Looping background track
pub trait MusicPlayer {
    /// Start or continue playback
    fn play(&mut self) -> Result<(), AudioError>;
    /// Stop playback, keeping the position
    fn pause(&mut self);
    /// Volume in 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Player that never makes a sound (native builds, or audio unavailable)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentMusic;

impl MusicPlayer for SilentMusic {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}
}

/// `<audio>` element playing a looped track
#[cfg(target_arch = "wasm32")]
pub struct WebMusic {
    element: Option<web_sys::HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl WebMusic {
    pub fn new(src: &str) -> Self {
        // May fail outside a document context; fall back to silence
        let element = web_sys::HtmlAudioElement::new_with_src(src).ok();
        match &element {
            Some(el) => el.set_loop(true),
            None => log::warn!("Failed to create audio element - music disabled"),
        }
        Self { element }
    }
}

#[cfg(target_arch = "wasm32")]
impl MusicPlayer for WebMusic {
    fn play(&mut self) -> Result<(), AudioError> {
        let Some(el) = &self.element else {
            return Err(AudioError::Unavailable);
        };
        let promise = el
            .play()
            .map_err(|e| AudioError::Rejected(format!("{e:?}")))?;

        // Autoplay policies reject asynchronously; swallow that too
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::debug!("Music playback rejected: {e:?}");
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(el) = &self.element {
            let _ = el.pause();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(el) = &self.element {
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }
}
