//! Highscore persistence
//!
//! Features:
//! - JSON record under a single well-known key
//! - Missing or corrupt data falls back to the default record
//! - Save failures are reported to the caller, never to the simulation

use crate::error::StorageError;
use crate::highscores::Highscore;
use crate::platform::KeyValueStore;

/// Storage key for the highscore record
pub const HIGHSCORE_KEY: &str = "breakoutHighscore";

/// Load the stored highscore, or the default record if absent or unreadable
pub fn load_highscore(store: &impl KeyValueStore) -> Highscore {
    match try_load_highscore(store) {
        Ok(Some(highscore)) => {
            log::info!("Loaded highscore {} ({})", highscore.score, highscore.name);
            highscore
        }
        Ok(None) => {
            log::info!("No highscore found, starting fresh");
            Highscore::default()
        }
        Err(e) => {
            log::warn!("Ignoring unreadable highscore: {e}");
            Highscore::default()
        }
    }
}

/// Load the stored highscore, surfacing storage and format errors
pub fn try_load_highscore(store: &impl KeyValueStore) -> Result<Option<Highscore>, StorageError> {
    let Some(json) = store.get_item(HIGHSCORE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&json)?))
}

/// Persist the highscore record
pub fn save_highscore(store: &mut impl KeyValueStore, highscore: &Highscore) -> Result<(), StorageError> {
    let json = serde_json::to_string(highscore)?;
    store.set_item(HIGHSCORE_KEY, &json)?;
    log::info!("Highscore saved ({} by {})", highscore.score, highscore.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_missing_is_default() {
        let store = MemoryStorage::new();
        assert_eq!(load_highscore(&store), Highscore::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStorage::new();
        save_highscore(&mut store, &Highscore::new("Ada", 120)).unwrap();
        assert_eq!(
            store.get_item(HIGHSCORE_KEY).unwrap().as_deref(),
            Some(r#"{"name":"Ada","score":120}"#)
        );
        assert_eq!(load_highscore(&store), Highscore::new("Ada", 120));
    }

    #[test]
    fn test_corrupt_falls_back() {
        let mut store = MemoryStorage::new();
        store.set_item(HIGHSCORE_KEY, "{\"name\": 3").unwrap();
        assert!(try_load_highscore(&store).is_err());
        assert_eq!(load_highscore(&store), Highscore::default());

        // Well-formed JSON of the wrong shape is corrupt too
        store.set_item(HIGHSCORE_KEY, "[1, 2]").unwrap();
        assert_eq!(load_highscore(&store), Highscore::default());
    }
}
