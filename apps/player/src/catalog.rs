//! Bundled lesson catalog.
//!
//! The content provider contract made concrete: lessons ship as static JSON
//! compiled into the binary, validated on every load so a bad build never
//! presents a partial lesson.

use serde::Serialize;

use lesson_core::error::{LessonError, Result};
use lesson_core::loader::parse_lesson;
use lesson_core::types::{ExerciseKind, Lesson};

const BASICS_1_ID: &str = "basics-1";
const BASICS_1: &str = include_str!("../data/basics-1.json");

/// Fetch an immutable lesson by id, or fail with a descriptive error.
pub fn load_lesson(lesson_id: &str) -> Result<Lesson> {
    match lesson_id {
        BASICS_1_ID => parse_lesson(BASICS_1),
        _ => Err(LessonError::UnknownLesson(lesson_id.to_string())),
    }
}

/// Catalog entry shown on a lesson-selection surface.
#[derive(Debug, Clone, Serialize)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
    pub exercise_count: usize,
    pub estimated_minutes: u32,
}

pub fn available_lessons() -> Vec<LessonSummary> {
    [BASICS_1_ID]
        .iter()
        .filter_map(|id| load_lesson(id).ok())
        .map(|lesson| LessonSummary {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            exercise_count: lesson.exercise_count(),
            estimated_minutes: estimated_minutes(&lesson),
        })
        .collect()
}

/// Rough completion estimate: one base minute per exercise, weighted by
/// kind.
pub fn estimated_minutes(lesson: &Lesson) -> u32 {
    let total: f64 = lesson
        .exercises
        .iter()
        .map(|exercise| match exercise.kind {
            ExerciseKind::MultipleChoice { .. } => 0.5,
            ExerciseKind::TypeAnswer { .. } => 1.0,
            ExerciseKind::WordBank { .. } => 1.2,
            ExerciseKind::MatchPairs { .. } => 1.5,
            ExerciseKind::ListeningPrompt { .. } => 1.3,
        })
        .sum();
    total.ceil() as u32
}
