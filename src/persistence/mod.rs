//! Ledger persistence over an injected key-value store
//!
//! The core never touches a storage backend directly: the driver hands in
//! anything implementing [`KeyValueStore`]. Stored data is a JSON array of
//! `{name, score, createdAt}` objects under a versioned key; a schema change
//! means a new key, not an in-place migration. Loading is lenient (anything
//! malformed degrades to an empty ledger) and saving swallows write failures
//! so gameplay is never interrupted by storage.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::highscores::{HighScoreEntry, HighScores, MAX_HIGH_SCORES, sanitize_name};

/// Versioned storage key for the ledger
pub const HIGH_SCORE_STORAGE_KEY: &str = "snake-highscores-v1";

/// Failure writing to the backing store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage write rejected: {0}")]
    Rejected(String),
}

/// Minimal browser-style string store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for native hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage adapter (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(key).ok())
            .flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Rejected("local storage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::QuotaExceeded)
    }
}

/// Load the ledger, degrading to empty on anything unreadable.
///
/// Entries are normalized field by field: names are sanitized, non-finite
/// scores become 0 (and non-positive entries are dropped), and a missing or
/// zero `createdAt` falls back to the entry's position in the stored array.
pub fn load_high_scores(store: &impl KeyValueStore, key: &str) -> HighScores {
    let Some(raw) = store.get_item(key) else {
        return HighScores::new();
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw) else {
        log::warn!("stored high scores under {key} are not a JSON array, starting fresh");
        return HighScores::new();
    };

    let mut entries = Vec::with_capacity(items.len().min(MAX_HIGH_SCORES));
    for (index, item) in items.iter().enumerate() {
        let name = sanitize_name(item.get("name").and_then(Value::as_str).unwrap_or(""));
        let score = finite_or_zero(item.get("score").and_then(Value::as_f64));
        if score <= 0.0 {
            continue;
        }
        let created_at = match finite_or_zero(item.get("createdAt").and_then(Value::as_f64)) {
            t if t != 0.0 => t as i64,
            _ => index as i64,
        };
        entries.push(HighScoreEntry {
            name,
            score: score as u64,
            created_at,
        });
    }
    HighScores::from_entries(entries)
}

/// Persist the ledger (sorted, trimmed). Failures are logged and swallowed;
/// a failed write leaves whatever was stored before untouched.
pub fn save_high_scores(store: &mut impl KeyValueStore, scores: &HighScores, key: &str) {
    let normalized = HighScores::from_entries(scores.entries.clone());
    match serde_json::to_string(&normalized.entries) {
        Ok(json) => {
            if let Err(err) = store.set_item(key, &json) {
                log::warn!("high score save failed: {err}");
            }
        }
        Err(err) => log::warn!("high score serialization failed: {err}"),
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose writes always fail, for degradation tests.
    struct BrokenStore {
        stored: Option<String>,
    }

    impl KeyValueStore for BrokenStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            self.stored.clone()
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::QuotaExceeded)
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_high_scores(&store, HIGH_SCORE_STORAGE_KEY).is_empty());
    }

    #[test]
    fn garbage_loads_empty() {
        let mut store = MemoryStore::new();
        store.set_item(HIGH_SCORE_STORAGE_KEY, "not json at all").unwrap();
        assert!(load_high_scores(&store, HIGH_SCORE_STORAGE_KEY).is_empty());

        store.set_item(HIGH_SCORE_STORAGE_KEY, "{\"score\": 5}").unwrap();
        assert!(load_high_scores(&store, HIGH_SCORE_STORAGE_KEY).is_empty());
    }

    #[test]
    fn non_positive_and_invalid_scores_are_dropped() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                HIGH_SCORE_STORAGE_KEY,
                r#"[
                    {"name": "A", "score": 5, "createdAt": 100},
                    {"name": "B", "score": 0, "createdAt": 101},
                    {"name": "C", "score": "oops", "createdAt": 102},
                    {"name": "D", "score": -3, "createdAt": 103}
                ]"#,
            )
            .unwrap();
        let scores = load_high_scores(&store, HIGH_SCORE_STORAGE_KEY);
        assert_eq!(scores.entries.len(), 1);
        assert_eq!(scores.entries[0].name, "A");
        assert_eq!(scores.entries[0].score, 5);
    }

    #[test]
    fn missing_created_at_falls_back_to_index() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                HIGH_SCORE_STORAGE_KEY,
                r#"[{"name": "A", "score": 7}, {"name": "B", "score": 7}]"#,
            )
            .unwrap();
        let scores = load_high_scores(&store, HIGH_SCORE_STORAGE_KEY);
        assert_eq!(scores.entries[0].name, "A");
        assert_eq!(scores.entries[0].created_at, 0);
        assert_eq!(scores.entries[1].created_at, 1);
    }

    #[test]
    fn loader_resorts_and_trims_to_the_cap() {
        let mut store = MemoryStore::new();
        store
            .set_item(
                HIGH_SCORE_STORAGE_KEY,
                r#"[
                    {"name": "A", "score": 2, "createdAt": 1},
                    {"name": "B", "score": 9, "createdAt": 2},
                    {"name": "C", "score": 4, "createdAt": 3},
                    {"name": "D", "score": 6, "createdAt": 4}
                ]"#,
            )
            .unwrap();
        let scores = load_high_scores(&store, HIGH_SCORE_STORAGE_KEY);
        let ranked: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![9, 6, 4]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::new();
        scores.add_at("Alice", 12, 100);
        scores.add_at("Bob", 8, 200);
        save_high_scores(&mut store, &scores, HIGH_SCORE_STORAGE_KEY);
        let loaded = load_high_scores(&store, HIGH_SCORE_STORAGE_KEY);
        assert_eq!(loaded, scores);
    }

    #[test]
    fn failed_writes_leave_prior_data_intact() {
        let mut store = BrokenStore {
            stored: Some(r#"[{"name": "Old", "score": 3, "createdAt": 1}]"#.to_string()),
        };
        let mut scores = HighScores::new();
        scores.add_at("New", 9, 2);
        save_high_scores(&mut store, &scores, HIGH_SCORE_STORAGE_KEY);

        let loaded = load_high_scores(&store, HIGH_SCORE_STORAGE_KEY);
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].name, "Old");
    }
}
