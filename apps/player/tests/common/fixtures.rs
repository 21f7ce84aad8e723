//! Factory functions for lesson content and graded submissions.

use lesson_core::types::{Exercise, ExerciseKind, Lesson, Pair};
use lesson_core::validation::AnswerInput;
use lingo_player::PlayerSession;

/// A small two-exercise lesson for scenarios that do not need the bundled
/// catalog content.
pub fn mini_lesson(id: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: format!("Mini lesson {id}"),
        xp_per_correct: 5,
        streak_increment: 1,
        exercises: vec![
            Exercise {
                id: "mini-1".to_string(),
                prompt: "Select the translation for: Water".to_string(),
                explanation: String::new(),
                kind: ExerciseKind::MultipleChoice {
                    choices: vec!["Agua".to_string(), "Pan".to_string()],
                    answer: "Agua".to_string(),
                },
            },
            Exercise {
                id: "mini-2".to_string(),
                prompt: "Type what you hear".to_string(),
                explanation: String::new(),
                kind: ExerciseKind::ListeningPrompt {
                    answer: "buenos días".to_string(),
                    audio_url: None,
                    fallback_text: "buenos días".to_string(),
                },
            },
        ],
    }
}

/// Submit the answer key itself for the given exercise. Panics if the
/// exercise is not part of the session's lesson.
pub fn submit_correct(session: &mut PlayerSession, exercise_id: &str) -> bool {
    let kind = session
        .progress()
        .lesson
        .exercise(exercise_id)
        .expect("exercise should exist")
        .kind
        .clone();

    match &kind {
        ExerciseKind::MultipleChoice { answer, .. } => {
            session.submit_answer(exercise_id, &AnswerInput::Text(answer.as_str()), 1200)
        }
        ExerciseKind::TypeAnswer { answers, .. } => {
            session.submit_answer(exercise_id, &AnswerInput::Text(answers[0].as_str()), 1200)
        }
        ExerciseKind::WordBank { answer, .. } => {
            session.submit_answer(exercise_id, &AnswerInput::List(answer.as_slice()), 1200)
        }
        ExerciseKind::MatchPairs { pairs } => {
            session.submit_answer(exercise_id, &AnswerInput::Pairs(pairs.as_slice()), 1200)
        }
        ExerciseKind::ListeningPrompt { answer, .. } => {
            session.submit_answer(exercise_id, &AnswerInput::Text(answer.as_str()), 1200)
        }
    }
}

/// Submit something guaranteed wrong for any exercise kind.
pub fn submit_incorrect(session: &mut PlayerSession, exercise_id: &str) -> bool {
    let kind = session
        .progress()
        .lesson
        .exercise(exercise_id)
        .expect("exercise should exist")
        .kind
        .clone();

    match &kind {
        ExerciseKind::WordBank { answer, .. } => {
            // Same words, reversed: wrong order is wrong.
            let reversed: Vec<String> = answer.iter().rev().cloned().collect();
            session.submit_answer(exercise_id, &AnswerInput::List(&reversed), 1200)
        }
        ExerciseKind::MatchPairs { pairs } => {
            let crossed: Vec<Pair> = pairs
                .iter()
                .map(|p| Pair::new(p.left.clone(), "zzz"))
                .collect();
            session.submit_answer(exercise_id, &AnswerInput::Pairs(&crossed), 1200)
        }
        _ => session.submit_answer(exercise_id, &AnswerInput::Text("definitely wrong"), 1200),
    }
}
