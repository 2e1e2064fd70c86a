//! High score leaderboard system
//!
//! Tracks the top 10 scores. The storage substrate is injected through
//! `ScoreStore`, so the core never touches a concrete backend; an in-memory
//! board doubles as the test fake, and a JSON file store covers native use.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Date achieved, as the caller formatted it
    pub date: String,
}

/// Storage backend for the leaderboard
pub trait ScoreStore {
    /// Entries sorted by score descending, at most `MAX_HIGH_SCORES`
    fn list(&self) -> Vec<HighScoreEntry>;
    /// Add an entry, re-sort, and truncate to `MAX_HIGH_SCORES`
    fn insert(&mut self, entry: HighScoreEntry);
}

/// True if a score would earn a slot on the board
pub fn is_high_score(store: &dyn ScoreStore, score: u64) -> bool {
    let entries = store.list();
    if entries.len() < MAX_HIGH_SCORES {
        return true;
    }
    entries.last().map(|e| score > e.score).unwrap_or(true)
}

/// Sort descending by score and drop past the cap. Ties keep insertion order.
fn rank_and_trim(entries: &mut Vec<HighScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
}

/// In-memory leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

impl ScoreStore for HighScores {
    fn list(&self) -> Vec<HighScoreEntry> {
        self.entries.clone()
    }

    fn insert(&mut self, entry: HighScoreEntry) {
        self.entries.push(entry);
        rank_and_trim(&mut self.entries);
    }
}

/// Leaderboard persisted as a JSON array in a single file
///
/// The file is re-read on every call so the substrate stays the source of
/// truth. I/O failures degrade to an empty list (read) or a logged no-op
/// (write) rather than surfacing errors to gameplay.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Vec<HighScoreEntry> {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&json) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[HighScoreEntry]) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::warn!("Could not create {:?}: {}", parent, e);
            return;
        }
        match serde_json::to_string_pretty(entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("Could not save high scores to {:?}: {}", self.path, e);
                } else {
                    log::info!("High scores saved ({} entries)", entries.len());
                }
            }
            Err(e) => log::warn!("Could not encode high scores: {}", e),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn list(&self) -> Vec<HighScoreEntry> {
        let mut entries = self.load();
        rank_and_trim(&mut entries);
        entries
    }

    fn insert(&mut self, entry: HighScoreEntry) {
        let mut entries = self.load();
        entries.push(entry);
        rank_and_trim(&mut entries);
        self.save(&entries);
    }
}
