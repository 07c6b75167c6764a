//! High score leaderboard
//!
//! Tracks the top 3 scores, sorted descending; ties go to the earlier entry.
//! Persisted through the key-value seam in [`crate::persistence`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 3;

/// Maximum visible characters in a player name
pub const MAX_NAME_LEN: usize = 16;

/// Trim, cap at [`MAX_NAME_LEN`] characters, and fall back to `"Player"`
/// when nothing printable remains.
pub fn sanitize_name(raw: &str) -> String {
    let trimmed: String = raw.trim().chars().take(MAX_NAME_LEN).collect();
    if trimmed.is_empty() {
        "Player".to_string()
    } else {
        trimmed
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    /// Sanitized player name
    pub name: String,
    /// Final score of the run
    pub score: u64,
    /// Unix timestamp (ms) when achieved; earlier wins ties
    pub created_at: i64,
}

/// High score leaderboard, kept sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, normalizing order and size.
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        sort_entries(&mut entries);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score would make the board.
    ///
    /// Zero never qualifies; a full board requires strictly beating the
    /// current floor, so tying the lowest entry is not enough.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        let floor = self.entries.iter().map(|e| e.score).min().unwrap_or(0);
        score > floor
    }

    /// Add an entry stamped with the current time.
    pub fn add(&mut self, name: &str, score: u64) {
        self.add_at(name, score, Utc::now().timestamp_millis());
    }

    /// Add an entry with an explicit timestamp, then re-sort and trim.
    pub fn add_at(&mut self, name: &str, score: u64, created_at: i64) {
        self.entries.push(HighScoreEntry {
            name: sanitize_name(name),
            score,
            created_at,
        });
        sort_entries(&mut self.entries);
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Descending by score, ties broken by ascending creation time.
fn sort_entries(entries: &mut [HighScoreEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.created_at.cmp(&b.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[(u64, i64)]) -> HighScores {
        HighScores::from_entries(
            scores
                .iter()
                .enumerate()
                .map(|(i, &(score, created_at))| HighScoreEntry {
                    name: format!("P{i}"),
                    score,
                    created_at,
                })
                .collect(),
        )
    }

    #[test]
    fn sanitize_trims_and_falls_back() {
        assert_eq!(sanitize_name("  Alice  "), "Alice");
        assert_eq!(sanitize_name("   "), "Player");
        assert_eq!(sanitize_name(""), "Player");
    }

    #[test]
    fn sanitize_caps_at_sixteen_characters() {
        assert_eq!(sanitize_name("abcdefghijklmnopqrstuvwx"), "abcdefghijklmnop");
    }

    #[test]
    fn zero_never_qualifies() {
        assert!(!HighScores::new().qualifies(0));
        assert!(HighScores::new().qualifies(5));
    }

    #[test]
    fn full_board_requires_beating_the_floor() {
        let scores = board(&[(10, 1), (8, 2), (6, 3)]);
        assert!(!scores.qualifies(6));
        assert!(scores.qualifies(7));
    }

    #[test]
    fn add_sorts_descending_and_keeps_top_three() {
        let mut scores = board(&[(10, 1), (8, 2), (6, 3)]);
        scores.add_at("D", 12, 4);
        let ranked: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![12, 10, 8]);
    }

    #[test]
    fn ties_rank_the_earlier_entry_first() {
        let scores = HighScores::from_entries(vec![
            HighScoreEntry {
                name: "Late".into(),
                score: 9,
                created_at: 2,
            },
            HighScoreEntry {
                name: "Early".into(),
                score: 9,
                created_at: 1,
            },
        ]);
        assert_eq!(scores.entries[0].name, "Early");
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn added_names_are_sanitized() {
        let mut scores = HighScores::new();
        scores.add_at("   ", 4, 1);
        assert_eq!(scores.entries[0].name, "Player");
    }
}
