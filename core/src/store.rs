use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// String key-value persistence, e.g. browser local storage.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used headless and in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the stored profile, falling back to defaults when it is absent or unreadable.
pub fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> PlayerProfile {
    let Some(raw) = store.load(PlayerProfile::STORAGE_KEY) else {
        log::debug!("no stored profile, using defaults");
        return PlayerProfile::default();
    };

    match serde_json::from_str::<PlayerProfile>(&raw) {
        Ok(profile) => profile.normalized(),
        Err(err) => {
            log::warn!("discarding unreadable profile: {}", err);
            PlayerProfile::default()
        }
    }
}

pub fn save_profile<S: KeyValueStore + ?Sized>(store: &mut S, profile: &PlayerProfile) -> Result<()> {
    let raw =
        serde_json::to_string(profile).map_err(|err| GameError::Serialization(err.to_string()))?;
    store.save(PlayerProfile::STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_loads_defaults() {
        let store = MemoryStore::new();

        assert_eq!(load_profile(&store), PlayerProfile::default());
    }

    #[test]
    fn corrupt_profile_loads_defaults() {
        let store = MemoryStore::with_entry(PlayerProfile::STORAGE_KEY, "{not json");

        assert_eq!(load_profile(&store), PlayerProfile::default());
    }

    #[test]
    fn wrongly_typed_field_loads_defaults() {
        let store =
            MemoryStore::with_entry(PlayerProfile::STORAGE_KEY, r#"{"gamesPlayed": "many"}"#);

        assert_eq!(load_profile(&store), PlayerProfile::default());
    }

    #[test]
    fn saved_profile_loads_back() {
        let mut store = MemoryStore::new();
        let mut profile = PlayerProfile {
            games_played: 7,
            average_moves: 11.5,
            win_streak: 2,
            difficulty_level: DifficultyLevel::new(3),
            last_play_time: chrono::DateTime::from_timestamp(1_700_000_000, 0),
            ..Default::default()
        };
        profile.record_token(Token::Peach);
        profile.record_time_of_day(TimeOfDay::Night);

        save_profile(&mut store, &profile).unwrap();

        assert_eq!(load_profile(&store), profile);
    }

    #[test]
    fn stored_values_are_clamped_on_load() {
        let store = MemoryStore::with_entry(
            PlayerProfile::STORAGE_KEY,
            r#"{"difficultyLevel": 12, "engagementScore": 180}"#,
        );

        let profile = load_profile(&store);

        assert_eq!(profile.difficulty_level, DifficultyLevel::MAX);
        assert_eq!(profile.engagement_score, 100.0);
    }
}
