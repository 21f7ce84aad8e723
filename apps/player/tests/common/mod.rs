//! Shared test infrastructure for the player integration tests.

pub mod fixtures;

use lingo_player::FileStore;
use tempfile::TempDir;

/// A store rooted in a fresh temporary directory. Keep the `TempDir` alive
/// for the duration of the test; the directory is removed on drop.
pub fn temp_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("create temp dir");
    let store = FileStore::new(dir.path());
    (dir, store)
}

/// A store rooted somewhere no directory can be created (under a plain
/// file), for storage-unavailable scenarios.
pub fn broken_store(dir: &TempDir) -> FileStore {
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").expect("write blocker file");
    FileStore::new(blocker.join("store"))
}
