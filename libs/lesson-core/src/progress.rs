//! Lesson progress state machine.
//!
//! A pure reducer over [`LessonAction`]: no I/O inside a transition, and the
//! current wall-clock time is always passed in by the caller. Persistence is
//! an observer that runs after each transition, outside this module.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AnswerValue, Exercise, ExerciseResult, Lesson};

/// Hearts at the start of a lesson session.
pub const STARTING_HEARTS: u32 = 3;

/// Derived view of where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    /// Absorbing sub-state of `InProgress`: blocks advancement until a
    /// restart.
    HeartsDepleted,
    /// Terminal until a restart.
    Complete,
}

/// Events the presentation layer feeds into the machine.
#[derive(Debug, Clone)]
pub enum LessonAction {
    /// Bind a lesson. Re-loading the already-bound lesson id preserves
    /// in-progress state; a different lesson resets the session.
    LoadLesson(Lesson),
    /// Record one graded submission. Grading happens in the validators
    /// before this event is emitted.
    SubmitAnswer {
        exercise_id: String,
        user_answer: AnswerValue,
        is_correct: bool,
        time_spent_ms: u64,
    },
    /// Advance to the next exercise; walking past the last one completes
    /// the lesson.
    NextExercise,
    /// Explicit heart penalty for UI flows that separate "recorded answer"
    /// from "heart loss". A no-op when the named exercise already holds a
    /// recorded incorrect result, so one wrong answer costs one heart.
    LoseHeart { exercise_id: String },
    /// Force completion. Idempotent: the streak increment applies at most
    /// once per session.
    CompleteLesson,
    /// Back to `NotStarted` with the same lesson and fresh counters.
    RestartLesson,
    /// Resume from a persisted snapshot. Used once, at session start.
    LoadSavedState(LessonProgress),
}

/// The mutable session state for one lesson. Exclusively owned by the
/// active session; cross-lesson stats live in the player's preferences, not
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub lesson: Lesson,
    pub current_index: usize,
    pub answers: HashMap<String, ExerciseResult>,
    pub hearts: u32,
    pub streak: u32,
    pub xp: u32,
    pub is_complete: bool,
    pub started_at: DateTime<Utc>,
    pub last_saved_at: DateTime<Utc>,
}

impl LessonProgress {
    pub fn new(lesson: Lesson, now: DateTime<Utc>) -> Self {
        Self {
            lesson,
            current_index: 0,
            answers: HashMap::new(),
            hearts: STARTING_HEARTS,
            streak: 0,
            xp: 0,
            is_complete: false,
            started_at: now,
            last_saved_at: now,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete {
            Phase::Complete
        } else if self.hearts == 0 {
            Phase::HeartsDepleted
        } else if self.current_index == 0 && self.answers.is_empty() {
            Phase::NotStarted
        } else {
            Phase::InProgress
        }
    }

    /// Exercise currently presented, `None` once the index has walked past
    /// the end.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.lesson.exercises.get(self.current_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.values().filter(|r| r.is_correct).count()
    }

    /// Apply one transition. Pure: the only inputs are the current state,
    /// the action, and `now`.
    pub fn apply(&mut self, action: LessonAction, now: DateTime<Utc>) {
        match action {
            LessonAction::LoadLesson(lesson) => {
                if lesson.id != self.lesson.id {
                    *self = Self::new(lesson, now);
                }
            }

            LessonAction::SubmitAnswer {
                exercise_id,
                user_answer,
                is_correct,
                time_spent_ms,
            } => self.submit_answer(exercise_id, user_answer, is_correct, time_spent_ms),

            LessonAction::NextExercise => {
                // Advancement is blocked while hearts are depleted and once
                // the lesson is complete.
                if self.is_complete || self.hearts == 0 {
                    return;
                }
                if self.current_index < self.lesson.exercises.len() {
                    self.current_index += 1;
                }
                if self.current_index >= self.lesson.exercises.len() {
                    self.complete_once();
                }
            }

            LessonAction::LoseHeart { exercise_id } => {
                let already_penalized = self
                    .answers
                    .get(&exercise_id)
                    .map_or(false, |r| !r.is_correct);
                if !already_penalized {
                    self.hearts = self.hearts.saturating_sub(1);
                }
            }

            LessonAction::CompleteLesson => self.complete_once(),

            LessonAction::RestartLesson => {
                let lesson = self.lesson.clone();
                *self = Self::new(lesson, now);
            }

            LessonAction::LoadSavedState(snapshot) => *self = snapshot,
        }
    }

    fn submit_answer(
        &mut self,
        exercise_id: String,
        user_answer: AnswerValue,
        is_correct: bool,
        time_spent_ms: u64,
    ) {
        // Answer keys are valid lesson exercise ids; anything else is
        // dropped rather than recorded.
        let Some(exercise) = self.lesson.exercise(&exercise_id) else {
            return;
        };
        let result = ExerciseResult {
            exercise_id: exercise_id.clone(),
            user_answer,
            correct_answer: exercise.correct_answer(),
            is_correct,
            time_spent_ms,
        };
        self.answers.insert(exercise_id, result);

        if is_correct {
            self.xp += self.lesson.xp_per_correct;
        } else {
            self.hearts = self.hearts.saturating_sub(1);
        }
    }

    /// The single place the streak increment is applied; the guard makes
    /// both completion paths idempotent.
    fn complete_once(&mut self) {
        if self.is_complete {
            return;
        }
        self.is_complete = true;
        self.streak += self.lesson.streak_increment;
    }
}
