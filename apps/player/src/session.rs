//! Player session orchestration.
//!
//! `PlayerSession` is the single owner of the active lesson's progress and
//! the cross-lesson user preferences. It applies reducer transitions, then
//! persists best-effort: storage failures are logged by the gateway and
//! never interrupt a transition.

use chrono::Utc;

use lesson_core::error::Result;
use lesson_core::progress::{LessonAction, LessonProgress, Phase};
use lesson_core::types::{Exercise, ExerciseKind, Lesson, Tolerance};
use lesson_core::validation::{check_answer, validation_feedback, AnswerInput, Feedback};

use crate::catalog;
use crate::storage::{FileStore, UserPreferences};

#[derive(Debug)]
pub struct PlayerSession {
    store: FileStore,
    prefs: UserPreferences,
    progress: LessonProgress,
}

impl PlayerSession {
    /// Open a session for a catalog lesson. A valid persisted snapshot for
    /// the requested lesson id wins over fresh content; otherwise the
    /// catalog is consulted.
    pub fn start(store: FileStore, lesson_id: &str) -> Result<Self> {
        match Self::resume(&store, lesson_id) {
            Some(progress) => Ok(Self::install(store, progress)),
            None => Ok(Self::install(
                store,
                LessonProgress::new(catalog::load_lesson(lesson_id)?, Utc::now()),
            )),
        }
    }

    /// Open a session for externally supplied lesson content (an alternate
    /// data provider). Same resume semantics as [`PlayerSession::start`].
    pub fn start_with(store: FileStore, lesson: Lesson) -> Self {
        match Self::resume(&store, &lesson.id) {
            Some(progress) => Self::install(store, progress),
            None => Self::install(store, LessonProgress::new(lesson, Utc::now())),
        }
    }

    /// Explicit sequencing, no timing heuristics: look for a snapshot
    /// first, and only when none is usable does the caller fetch content.
    /// Snapshots for a different lesson, or completed ones that failed to
    /// clear, are discarded.
    fn resume(store: &FileStore, lesson_id: &str) -> Option<LessonProgress> {
        let snapshot = store.load_lesson_state()?;
        if snapshot.lesson.id != lesson_id || snapshot.is_complete {
            tracing::debug!(found = %snapshot.lesson.id, "discarding unusable lesson snapshot");
            store.clear_lesson_state();
            return None;
        }

        tracing::debug!(lesson = %lesson_id, "resuming persisted session");
        let now = Utc::now();
        let mut progress = LessonProgress::new(snapshot.lesson.clone(), now);
        progress.apply(LessonAction::LoadSavedState(snapshot), now);
        Some(progress)
    }

    fn install(store: FileStore, progress: LessonProgress) -> Self {
        let prefs = store.load_user_preferences();
        let session = Self {
            store,
            prefs,
            progress,
        };
        session.store.save_lesson_state(&session.progress);
        session
    }

    /// Grade and record a submission. Returns whether it was correct.
    pub fn submit_answer(
        &mut self,
        exercise_id: &str,
        input: &AnswerInput<'_>,
        time_spent_ms: u64,
    ) -> bool {
        let Some(exercise) = self.progress.lesson.exercise(exercise_id) else {
            tracing::warn!(exercise = %exercise_id, "submission for unknown exercise dropped");
            return false;
        };
        let is_correct = check_answer(exercise, input);
        self.dispatch(LessonAction::SubmitAnswer {
            exercise_id: exercise_id.to_string(),
            user_answer: input.to_value(),
            is_correct,
            time_spent_ms,
        });
        is_correct
    }

    /// Move to the next exercise; walking past the last one completes the
    /// lesson and runs the completion side-effects.
    pub fn advance(&mut self) {
        self.dispatch(LessonAction::NextExercise);
    }

    /// Force completion (e.g. a skip-to-end flow). Idempotent.
    pub fn complete(&mut self) {
        self.dispatch(LessonAction::CompleteLesson);
    }

    pub fn restart(&mut self) {
        self.dispatch(LessonAction::RestartLesson);
    }

    /// Explicit heart penalty for presentation flows that grade outside
    /// [`PlayerSession::submit_answer`]. One wrong answer costs one heart:
    /// the machine ignores this when the exercise already recorded a miss.
    pub fn lose_heart(&mut self, exercise_id: &str) {
        self.dispatch(LessonAction::LoseHeart {
            exercise_id: exercise_id.to_string(),
        });
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.prefs.locale = locale.to_string();
        self.store.save_user_preferences(&self.prefs);
    }

    /// Best-effort hint for an incorrect typed answer. `None` for exercise
    /// kinds with no free-typed input.
    pub fn feedback_for(&self, exercise_id: &str, user: &str) -> Option<Feedback> {
        let exercise = self.progress.lesson.exercise(exercise_id)?;
        match &exercise.kind {
            ExerciseKind::TypeAnswer { answers, tolerance } => {
                Some(validation_feedback(user, answers, tolerance))
            }
            ExerciseKind::ListeningPrompt { answer, .. } => Some(validation_feedback(
                user,
                std::slice::from_ref(answer),
                &Tolerance::default(),
            )),
            _ => None,
        }
    }

    pub fn progress(&self) -> &LessonProgress {
        &self.progress
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn phase(&self) -> Phase {
        self.progress.phase()
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.progress.current_exercise()
    }

    /// Apply one transition, then persist. Crossing into completion swaps
    /// the snapshot write for the completion side-effects.
    fn dispatch(&mut self, action: LessonAction) {
        let was_complete = self.progress.is_complete;
        self.progress.apply(action, Utc::now());

        if !was_complete && self.progress.is_complete {
            self.finish_lesson();
        } else {
            self.store.save_lesson_state(&self.progress);
        }
    }

    /// Runs exactly once per completion: fold the session's XP and the
    /// streak increment into the user preferences, then clear the snapshot.
    /// The clear does not depend on the preferences write having succeeded;
    /// a completed lesson must never leave a resumable snapshot behind.
    fn finish_lesson(&mut self) {
        let increment = self.progress.lesson.streak_increment;
        self.prefs.total_xp += self.progress.xp;
        self.prefs.total_streak = self.prefs.total_streak.max(self.prefs.total_streak + increment);
        self.prefs.last_played_lesson_id = Some(self.progress.lesson.id.clone());
        self.store.save_user_preferences(&self.prefs);
        self.store.clear_lesson_state();
        tracing::debug!(
            lesson = %self.progress.lesson.id,
            xp = self.progress.xp,
            "lesson complete"
        );
    }
}
