//! Answer validation for the five exercise kinds.
//!
//! Every validator is pure and total over well-formed exercise data: an
//! incorrect answer is an expected outcome, never an error, and empty user
//! input is always incorrect.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, NormalizeOptions};
use crate::types::{AnswerValue, Exercise, ExerciseKind, Pair, Tolerance};

/// Similarity above which an incorrect answer is considered "close" for
/// feedback purposes.
pub const CLOSE_THRESHOLD: f64 = 0.7;

fn label(text: &str) -> String {
    normalize(text, &NormalizeOptions::label())
}

/// Choice identity is case-sensitive: choices are fixed label strings.
pub fn validate_multiple_choice(user: &str, correct: &str) -> bool {
    let user = label(user);
    !user.is_empty() && user == label(correct)
}

/// True iff the normalized input equals the same normalization of any
/// accepted variant. Accents are always folded for typed answers.
pub fn validate_text_answer(user: &str, accepted: &[String], tolerance: &Tolerance) -> bool {
    let options = NormalizeOptions::typed(tolerance);
    let user = normalize(user, &options);
    if user.is_empty() {
        return false;
    }
    accepted.iter().any(|a| normalize(a, &options) == user)
}

/// Sequence identity: length must match exactly, then position by position.
/// Same multiset in the wrong order is incorrect.
pub fn validate_word_bank(user: &[String], correct: &[String]) -> bool {
    if user.is_empty() || user.len() != correct.len() {
        return false;
    }
    user.iter()
        .zip(correct)
        .all(|(u, c)| label(u) == label(c))
}

/// Order-independent set containment with an enforced bijection: every user
/// pair must consume a distinct correct pair, so duplicated string values
/// cannot satisfy the count check twice.
pub fn validate_match_pairs(user: &[Pair], correct: &[Pair]) -> bool {
    if user.is_empty() || user.len() != correct.len() {
        return false;
    }

    let mut used = vec![false; correct.len()];
    'user: for m in user {
        for (i, c) in correct.iter().enumerate() {
            if !used[i] && label(&m.left) == label(&c.left) && label(&m.right) == label(&c.right) {
                used[i] = true;
                continue 'user;
            }
        }
        return false;
    }
    true
}

/// Borrowed form of a user submission, as collected by the presentation
/// layer.
#[derive(Debug, Clone, Copy)]
pub enum AnswerInput<'a> {
    Text(&'a str),
    List(&'a [String]),
    Pairs(&'a [Pair]),
}

impl AnswerInput<'_> {
    /// Owned form for recording in an `ExerciseResult`; pairs serialize as
    /// `"left-right"` strings.
    pub fn to_value(&self) -> AnswerValue {
        match self {
            Self::Text(text) => AnswerValue::Text((*text).to_string()),
            Self::List(items) => AnswerValue::List(items.to_vec()),
            Self::Pairs(pairs) => AnswerValue::List(pairs.iter().map(Pair::render).collect()),
        }
    }
}

/// Grade a submission against the exercise's answer key. A submission whose
/// shape does not fit the exercise kind is simply incorrect.
pub fn check_answer(exercise: &Exercise, input: &AnswerInput<'_>) -> bool {
    match (&exercise.kind, input) {
        (ExerciseKind::MultipleChoice { answer, .. }, AnswerInput::Text(user)) => {
            validate_multiple_choice(user, answer)
        }
        (ExerciseKind::TypeAnswer { answers, tolerance }, AnswerInput::Text(user)) => {
            validate_text_answer(user, answers, tolerance)
        }
        (ExerciseKind::WordBank { answer, .. }, AnswerInput::List(user)) => {
            validate_word_bank(user, answer)
        }
        (ExerciseKind::MatchPairs { pairs }, AnswerInput::Pairs(user)) => {
            validate_match_pairs(user, pairs)
        }
        (ExerciseKind::ListeningPrompt { answer, .. }, AnswerInput::Text(user)) => {
            validate_text_answer(user, std::slice::from_ref(answer), &Tolerance::default())
        }
        _ => false,
    }
}

/// Best-effort hint for an incorrect answer. Not authoritative for
/// correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub is_close: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Feedback {
    fn not_close() -> Self {
        Self {
            is_close: false,
            suggestion: None,
            hint: None,
        }
    }
}

/// Produce a hint when an answer is close: a capitalization/spacing nudge
/// when only case or surrounding whitespace differs, otherwise a spelling
/// suggestion when the best Levenshtein similarity clears
/// [`CLOSE_THRESHOLD`].
pub fn validation_feedback(user: &str, accepted: &[String], tolerance: &Tolerance) -> Feedback {
    let relaxed_user = user.trim().to_lowercase();
    if let Some(exact) = accepted
        .iter()
        .find(|a| a.trim().to_lowercase() == relaxed_user)
    {
        if exact.as_str() != user {
            return Feedback {
                is_close: true,
                suggestion: Some(exact.clone()),
                hint: Some("Watch your capitalization and spacing!".to_string()),
            };
        }
    }

    let options = NormalizeOptions::typed(tolerance);
    let user_normalized = normalize(user, &options);

    let mut closest: Option<(&String, f64)> = None;
    for answer in accepted {
        let score = similarity(&user_normalized, &normalize(answer, &options));
        if closest.map_or(true, |(_, best)| score > best) {
            closest = Some((answer, score));
        }
    }

    match closest {
        Some((answer, score)) if score > CLOSE_THRESHOLD => Feedback {
            is_close: true,
            suggestion: Some(answer.clone()),
            hint: Some("You're very close! Check your spelling.".to_string()),
        },
        _ => Feedback::not_close(),
    }
}

/// Normalized similarity in `[0.0, 1.0]` based on Levenshtein distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - levenshtein_distance(a, b)) as f64 / max_len as f64
}

/// Levenshtein edit distance over characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
