//! Player settings and preferences
//!
//! Persisted separately from the highscore, under their own storage key.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence the music entirely
    pub muted: bool,

    // === Behavior ===
    /// Pause automatically when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            muted: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "breakout_settings";

    /// Volume to hand to the music player (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings, using defaults when missing or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_music_volume(), 0.5);
        settings.music_volume = 3.0;
        assert_eq!(settings.effective_music_volume(), 1.0);
        settings.muted = true;
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStorage::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings {
            music_volume: 0.2,
            muted: true,
            pause_on_blur: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt() {
        let mut store = MemoryStorage::new();
        store
            .set_item(Settings::STORAGE_KEY, r#"{"muted": true}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert!(settings.pause_on_blur);

        store.set_item(Settings::STORAGE_KEY, "oops").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
