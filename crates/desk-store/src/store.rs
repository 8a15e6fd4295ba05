//! The state file store.
//!
//! Owns the canonical persisted document. Two load contracts exist: the
//! sync path tolerates a missing or corrupt file (it rebuilds from source
//! data and previous defaults), while mutation commands must fail loudly,
//! since there is no meaningful partial update to apply to a document that
//! cannot be read.
//!
//! No lock is taken. Overlapping load-modify-save cycles race and the
//! later save wins; callers are expected to serialize invocations
//! externally.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use desk_core::State;

use crate::error::{StoreError, StoreResult};

/// Store for the persisted dashboard document.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, falling back to the first-init default shape on
    /// a missing or unreadable file.
    pub fn load(&self) -> State {
        match self.load_strict() {
            Ok(state) => state,
            Err(StoreError::Missing(_)) => {
                debug!(path = %self.path.display(), "No state file yet, starting from defaults");
                State::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "State file unreadable, starting from defaults");
                State::default()
            }
        }
    }

    /// Load the document, treating a missing or unreadable file as an
    /// error. Mutation entry points use this contract.
    pub fn load_strict(&self) -> StoreResult<State> {
        if !self.path.exists() {
            return Err(StoreError::Missing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)?;
        Ok(state)
    }

    /// Stamp `lastUpdated` and write the full document.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target, so a crash mid-write leaves the previous document intact.
    pub fn save(&self, state: &mut State) -> StoreResult<()> {
        state.last_updated = Some(Utc::now());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = json.len(), "State saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::BotStatus;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join("state.json"))
    }

    #[test]
    fn load_missing_file_returns_default_shape() {
        let dir = TempDir::new().unwrap();
        let state = store_in(&dir).load();
        assert_eq!(state, State::default());
    }

    #[test]
    fn load_corrupt_file_returns_default_shape() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), State::default());
    }

    #[test]
    fn load_strict_errors_on_missing_and_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.load_strict(), Err(StoreError::Missing(_))));

        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load_strict(), Err(StoreError::Parse(_))));
    }

    #[test]
    fn save_stamps_last_updated_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = State::default();
        state.trading_bot.status = BotStatus::Active;
        store.save(&mut state).unwrap();
        assert!(state.last_updated.is_some());

        let loaded = store.load_strict().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.trading_bot.status, BotStatus::Active);
    }

    #[test]
    fn save_replaces_previous_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut first = State::default();
        first.daily.notes = "first".to_string();
        store.save(&mut first).unwrap();

        let mut second = State::default();
        second.daily.notes = "second".to_string();
        store.save(&mut second).unwrap();

        assert_eq!(store.load().daily.notes, "second");
        // No temp file left behind.
        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
