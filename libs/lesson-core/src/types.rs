//! Core types for the lesson player.

use serde::{Deserialize, Serialize};

/// Comparison tolerance for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
    #[serde(default = "default_true")]
    pub trim: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            trim: true,
        }
    }
}

/// One left/right pairing in a match-pairs exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

impl Pair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Render as the `"left-right"` form used in recorded results.
    pub fn render(&self) -> String {
        format!("{}-{}", self.left, self.right)
    }
}

/// Kind-specific exercise payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    MultipleChoice {
        choices: Vec<String>,
        answer: String,
    },
    TypeAnswer {
        /// Accepted answer variants; any one of them counts as correct.
        answers: Vec<String>,
        #[serde(default)]
        tolerance: Tolerance,
    },
    WordBank {
        /// Shuffleable word pool presented to the user.
        bank: Vec<String>,
        /// Ordered correct sequence; must be drawn from `bank`.
        answer: Vec<String>,
    },
    MatchPairs {
        pairs: Vec<Pair>,
    },
    ListeningPrompt {
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_url: Option<String>,
        #[serde(default)]
        fallback_text: String,
    },
}

impl ExerciseKind {
    /// Kind tag as it appears in lesson content.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple_choice",
            Self::TypeAnswer { .. } => "type_answer",
            Self::WordBank { .. } => "word_bank",
            Self::MatchPairs { .. } => "match_pairs",
            Self::ListeningPrompt { .. } => "listening_prompt",
        }
    }
}

/// One gradable prompt-and-answer unit within a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(flatten)]
    pub kind: ExerciseKind,
}

impl Exercise {
    /// The answer key rendered the way it is recorded in results: pairs as
    /// `"left-right"` strings, single answers as text, lists as lists.
    pub fn correct_answer(&self) -> AnswerValue {
        match &self.kind {
            ExerciseKind::MultipleChoice { answer, .. } => AnswerValue::Text(answer.clone()),
            ExerciseKind::TypeAnswer { answers, .. } => AnswerValue::List(answers.clone()),
            ExerciseKind::WordBank { answer, .. } => AnswerValue::List(answer.clone()),
            ExerciseKind::MatchPairs { pairs } => {
                AnswerValue::List(pairs.iter().map(Pair::render).collect())
            }
            ExerciseKind::ListeningPrompt { answer, .. } => AnswerValue::Text(answer.clone()),
        }
    }
}

/// A lesson as supplied by the content provider. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub xp_per_correct: u32,
    pub streak_increment: u32,
    pub exercises: Vec<Exercise>,
}

impl Lesson {
    pub fn exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }
}

/// What the user submitted, in owned form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

/// Recorded outcome of one attempted exercise. Write-once per exercise id;
/// a later submission for the same id overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub exercise_id: String,
    pub user_answer: AnswerValue,
    pub correct_answer: AnswerValue,
    pub is_correct: bool,
    pub time_spent_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exercise_kind_round_trips_through_tag() {
        let json = r#"{
            "id": "ex-1",
            "prompt": "Select the translation for: Hello",
            "explanation": "Hola is the standard greeting.",
            "type": "multiple_choice",
            "choices": ["Hola", "Adiós"],
            "answer": "Hola"
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.kind.name(), "multiple_choice");

        let back = serde_json::to_string(&exercise).unwrap();
        let reparsed: Exercise = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, exercise);
    }

    #[test]
    fn tolerance_defaults_when_omitted() {
        let json = r#"{
            "id": "ex-2",
            "prompt": "Type the translation for: Thank you",
            "type": "type_answer",
            "answers": ["gracias"]
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        match exercise.kind {
            ExerciseKind::TypeAnswer { tolerance, .. } => {
                assert!(tolerance.case_insensitive);
                assert!(tolerance.trim);
            }
            other => panic!("unexpected kind: {}", other.name()),
        }
    }

    #[test]
    fn match_pairs_answer_renders_as_joined_strings() {
        let exercise = Exercise {
            id: "ex-3".to_string(),
            prompt: "Match pairs".to_string(),
            explanation: String::new(),
            kind: ExerciseKind::MatchPairs {
                pairs: vec![Pair::new("Hello", "Hola"), Pair::new("Goodbye", "Adiós")],
            },
        };
        assert_eq!(
            exercise.correct_answer(),
            AnswerValue::List(vec!["Hello-Hola".to_string(), "Goodbye-Adiós".to_string()])
        );
    }
}
