//! Per-difficulty leaderboard

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::{KeyValueStore, StoreError};

/// Prefix of every leaderboard key; the difficulty label follows after `_`
pub const STORAGE_KEY_PREFIX: &str = "snake_rating";

/// Best score of one player on one difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: String,
}

impl RatingEntry {
    pub fn new(name: impl Into<String>, score: u32, difficulty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            difficulty: difficulty.into(),
        }
    }

    fn same_player(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Leaderboard over a key-value store, one record per difficulty
#[derive(Debug, Clone)]
pub struct RatingStore<K> {
    store: K,
}

impl<K: KeyValueStore> RatingStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn key_for(difficulty: &str) -> String {
        format!("{STORAGE_KEY_PREFIX}_{difficulty}")
    }

    /// Record a result, keeping the best score per player (names compared
    /// case-insensitively)
    pub fn upsert(&mut self, difficulty: &str, name: &str, score: u32) -> Result<(), StoreError> {
        let mut entries = self.load(difficulty);

        match entries.iter_mut().find(|entry| entry.same_player(name)) {
            Some(entry) => {
                if score > entry.score {
                    debug!(player = %entry.name, old = entry.score, new = score, "new best score");
                    entry.score = score;
                }
            }
            None => entries.push(RatingEntry::new(name, score, difficulty)),
        }

        let json = serde_json::to_string(&entries)?;
        self.store.set(&Self::key_for(difficulty), &json)
    }

    /// Entries for a difficulty, best score first. Ties keep insertion order.
    pub fn list(&self, difficulty: &str) -> Vec<RatingEntry> {
        let mut entries = self.load(difficulty);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Stored entries in insertion order; missing or malformed data reads as
    /// an empty list
    fn load(&self, difficulty: &str) -> Vec<RatingEntry> {
        let key = Self::key_for(difficulty);
        let Some(raw) = self.store.get(&key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Option<Vec<RatingEntry>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(key = %key, error = %err, "ignoring malformed leaderboard");
                Vec::new()
            }
        }
    }
}
