//! Lesson content parsing and schema validation.
//!
//! The content provider hands over JSON; this module turns it into a
//! validated [`Lesson`] or a descriptive [`LessonError`]. Validators and the
//! state machine may assume every invariant checked here.

use std::collections::{HashMap, HashSet};

use crate::error::{LessonError, Result};
use crate::types::{Exercise, ExerciseKind, Lesson};

/// Parse and validate lesson JSON.
pub fn parse_lesson(json: &str) -> Result<Lesson> {
    let lesson: Lesson = serde_json::from_str(json)?;
    validate_lesson(&lesson)?;
    Ok(lesson)
}

/// Validate an already-deserialized lesson.
pub fn validate_lesson(lesson: &Lesson) -> Result<()> {
    if lesson.id.trim().is_empty() {
        return Err(LessonError::InvalidLesson("missing lesson id".to_string()));
    }
    if lesson.title.trim().is_empty() {
        return Err(LessonError::InvalidLesson("missing lesson title".to_string()));
    }
    if lesson.exercises.is_empty() {
        return Err(LessonError::EmptyLesson);
    }

    let mut seen_ids = HashSet::new();
    for (index, exercise) in lesson.exercises.iter().enumerate() {
        if exercise.id.trim().is_empty() {
            return Err(invalid(index, exercise, "missing exercise id"));
        }
        if !seen_ids.insert(exercise.id.as_str()) {
            return Err(LessonError::DuplicateExerciseId {
                index,
                id: exercise.id.clone(),
            });
        }
        if exercise.prompt.trim().is_empty() {
            return Err(invalid(index, exercise, "missing prompt"));
        }
        validate_kind(index, exercise)?;
    }

    Ok(())
}

fn validate_kind(index: usize, exercise: &Exercise) -> Result<()> {
    match &exercise.kind {
        ExerciseKind::MultipleChoice { choices, answer } => {
            if choices.is_empty() {
                return Err(invalid(index, exercise, "no choices"));
            }
            if answer.trim().is_empty() {
                return Err(invalid(index, exercise, "missing answer"));
            }
            if !choices.contains(answer) {
                return Err(invalid(index, exercise, "answer not among choices"));
            }
        }
        ExerciseKind::TypeAnswer { answers, .. } => {
            if answers.is_empty() {
                return Err(invalid(index, exercise, "no accepted answers"));
            }
            if answers.iter().any(|a| a.trim().is_empty()) {
                return Err(invalid(index, exercise, "empty accepted answer"));
            }
        }
        ExerciseKind::WordBank { bank, answer } => {
            if bank.is_empty() {
                return Err(invalid(index, exercise, "empty word bank"));
            }
            if answer.is_empty() {
                return Err(invalid(index, exercise, "missing answer sequence"));
            }
            if let Some(word) = multiset_missing(answer, bank) {
                return Err(invalid(
                    index,
                    exercise,
                    &format!("answer word {word:?} not available in bank"),
                ));
            }
        }
        ExerciseKind::MatchPairs { pairs } => {
            if pairs.is_empty() {
                return Err(invalid(index, exercise, "no pairs"));
            }
            if pairs
                .iter()
                .any(|p| p.left.trim().is_empty() || p.right.trim().is_empty())
            {
                return Err(invalid(index, exercise, "pair with empty side"));
            }
        }
        ExerciseKind::ListeningPrompt { answer, .. } => {
            if answer.trim().is_empty() {
                return Err(invalid(index, exercise, "missing answer"));
            }
        }
    }
    Ok(())
}

/// First answer word whose required count exceeds its availability in the
/// bank, if any. The answer must be drawn from the bank as a multiset.
fn multiset_missing<'a>(answer: &'a [String], bank: &[String]) -> Option<&'a String> {
    let mut available: HashMap<&str, usize> = HashMap::new();
    for word in bank {
        *available.entry(word.as_str()).or_default() += 1;
    }
    answer.iter().find(|word| {
        let count = available.entry(word.as_str()).or_default();
        if *count == 0 {
            true
        } else {
            *count -= 1;
            false
        }
    })
}

fn invalid(index: usize, exercise: &Exercise, reason: &str) -> LessonError {
    LessonError::InvalidExercise {
        index,
        id: exercise.id.clone(),
        kind: exercise.kind.name(),
        reason: reason.to_string(),
    }
}
