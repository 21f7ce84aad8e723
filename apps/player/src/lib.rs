//! Headless runtime for the single-lesson exercise player.
//!
//! A presentation layer renders exercises and collects raw input; this
//! crate owns everything behind that boundary: the bundled lesson catalog,
//! the file-backed persistence gateway, and the session that drives the
//! `lesson-core` state machine.

pub mod catalog;
pub mod session;
pub mod storage;

pub use session::PlayerSession;
pub use storage::{FileStore, UserPreferences, SNAPSHOT_MAX_AGE_HOURS};
