//! Core library for the single-lesson exercise player.
//!
//! Provides:
//! - Lesson content parsing and schema validation
//! - Text normalization and per-kind answer validators
//! - Close-answer feedback (Levenshtein distance)
//! - The lesson progress state machine (pure reducer)
//!
//! Everything here is pure: no I/O, no clocks read internally. The player
//! runtime in `apps/player` owns persistence and sessions.

pub mod error;
pub mod loader;
pub mod normalize;
pub mod progress;
pub mod types;
pub mod validation;

pub use error::{LessonError, Result};
pub use loader::{parse_lesson, validate_lesson};
pub use normalize::{normalize, NormalizeOptions};
pub use progress::{LessonAction, LessonProgress, Phase, STARTING_HEARTS};
pub use types::{
    AnswerValue, Exercise, ExerciseKind, ExerciseResult, Lesson, Pair, Tolerance,
};
pub use validation::{
    check_answer, validate_match_pairs, validate_multiple_choice, validate_text_answer,
    validate_word_bank, validation_feedback, AnswerInput, Feedback,
};
