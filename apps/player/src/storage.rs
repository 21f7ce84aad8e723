//! File-backed persistence for lesson snapshots and user preferences.
//!
//! Best-effort by contract: every public operation swallows and logs
//! storage failures so a transition is never interrupted by an I/O error.
//! The session stays usable in memory even with storage fully unavailable.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use lesson_core::progress::LessonProgress;

const LESSON_STATE_FILE: &str = "lesson_state.json";
const USER_PREFS_FILE: &str = "user_prefs.json";
const PROBE_FILE: &str = ".storage_probe";

/// Snapshots strictly older than this are discarded at load time.
pub const SNAPSHOT_MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cross-lesson user state. Outlives any single lesson session; only ever
/// mutated additively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub locale: String,
    pub total_streak: u32,
    pub total_xp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played_lesson_id: Option<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            total_streak: 0,
            total_xp: 0,
            last_played_lesson_id: None,
        }
    }
}

/// JSON-file persistence gateway under one root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the platform data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("lingo-player"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist the session snapshot, stamping the save time first. Failures
    /// are logged and swallowed.
    pub fn save_lesson_state(&self, progress: &LessonProgress) {
        let mut snapshot = progress.clone();
        snapshot.last_saved_at = Utc::now();
        if let Err(e) = self.write_json(LESSON_STATE_FILE, &snapshot) {
            tracing::warn!("failed to save lesson state: {e}");
        } else {
            tracing::debug!(lesson = %snapshot.lesson.id, "saved lesson snapshot");
        }
    }

    /// Load the persisted snapshot, if any. Missing, unparsable, and stale
    /// records all yield `None`; unparsable and stale records are deleted.
    pub fn load_lesson_state(&self) -> Option<LessonProgress> {
        self.load_lesson_state_at(Utc::now())
    }

    /// Expiry is evaluated against the supplied `now`: a snapshot exactly
    /// [`SNAPSHOT_MAX_AGE_HOURS`] old still loads, anything older is
    /// removed.
    pub fn load_lesson_state_at(&self, now: DateTime<Utc>) -> Option<LessonProgress> {
        let snapshot: LessonProgress = match self.read_json(LESSON_STATE_FILE) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("discarding unreadable lesson snapshot: {e}");
                self.clear_lesson_state();
                return None;
            }
        };

        if now - snapshot.last_saved_at > Duration::hours(SNAPSHOT_MAX_AGE_HOURS) {
            tracing::debug!(lesson = %snapshot.lesson.id, "discarding stale lesson snapshot");
            self.clear_lesson_state();
            return None;
        }

        Some(snapshot)
    }

    pub fn clear_lesson_state(&self) {
        let path = self.root.join(LESSON_STATE_FILE);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("failed to clear lesson state: {e}");
            }
        }
    }

    pub fn save_user_preferences(&self, prefs: &UserPreferences) {
        if let Err(e) = self.write_json(USER_PREFS_FILE, prefs) {
            tracing::warn!("failed to save user preferences: {e}");
        }
    }

    /// Missing or corrupt preference data falls back to defaults.
    pub fn load_user_preferences(&self) -> UserPreferences {
        match self.read_json(USER_PREFS_FILE) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => UserPreferences::default(),
            Err(e) => {
                tracing::warn!("failed to load user preferences, using defaults: {e}");
                UserPreferences::default()
            }
        }
    }

    /// Read-modify-write of the cross-lesson stats: XP accumulates, the
    /// streak never decreases.
    pub fn update_user_stats(&self, xp_gained: u32, streak_increment: u32) {
        let mut prefs = self.load_user_preferences();
        prefs.total_xp += xp_gained;
        prefs.total_streak = prefs.total_streak.max(prefs.total_streak + streak_increment);
        self.save_user_preferences(&prefs);
    }

    /// Capability probe: write and delete a sentinel file.
    pub fn is_available(&self) -> bool {
        let probe = self.root.join(PROBE_FILE);
        let ok = fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(&probe, b"probe"))
            .and_then(|_| fs::remove_file(&probe))
            .is_ok();
        if !ok {
            tracing::debug!(root = %self.root.display(), "storage unavailable");
        }
        ok
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Atomic write: temp file in the same directory, then rename, so the
    /// stored record is never half-written.
    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(file);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
