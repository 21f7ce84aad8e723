//! Error types for lesson-core.

use thiserror::Error;

/// Result type alias using LessonError.
pub type Result<T> = std::result::Result<T, LessonError>;

/// Content errors: fatal to lesson load, surfaced to the presentation
/// boundary as one descriptive message. No partial lesson is ever produced.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error("unknown lesson id: {0}")]
    UnknownLesson(String),

    #[error("malformed lesson JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid lesson: {0}")]
    InvalidLesson(String),

    #[error("lesson contains no exercises")]
    EmptyLesson,

    #[error("invalid {kind} exercise {id:?} at index {index}: {reason}")]
    InvalidExercise {
        index: usize,
        id: String,
        kind: &'static str,
        reason: String,
    },

    #[error("duplicate exercise id {id:?} at index {index}")]
    DuplicateExerciseId { index: usize, id: String },
}
