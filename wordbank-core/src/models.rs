use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type VocabId = i64;
pub type CategoryId = i64;
pub type QuestionId = i64;
pub type ResultId = i64;
pub type UserId = i64;

pub const ALL_CATEGORIES: &str = "All Categories";
pub const DEFAULT_ROLE: &str = "user";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub id: VocabId,
    pub word: String,
    pub meaning: String,
    pub category_id: CategoryId,
    pub topic: String,
    pub is_learned: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub topic: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub category: String,
}

impl Question {
    /// The stored answer must be one of the offered options.
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() >= 2
            && self.options.iter().any(|o| o == &self.answer)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
}

/// A finished quiz outcome before the store has assigned it an id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizDraft {
    pub date: DateTime<Utc>,
    pub category: String,
    pub score: u32,
    pub total: u32,
    pub answers: Vec<AnswerRecord>,
}

impl QuizDraft {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (100.0 * self.score as f64 / self.total as f64).round() as u32
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizResult {
    pub id: ResultId,
    pub date: DateTime<Utc>,
    pub category: String,
    pub score: u32,
    pub total: u32,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Derives the URL-safe topic slug from a category name: lowercase, trim,
/// whitespace runs collapse to `-`, everything outside `[a-z0-9-]` dropped.
pub fn generate_topic(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            // a whitespace run becomes exactly one dash
            in_gap = true;
            continue;
        }
        if in_gap {
            out.push('-');
            in_gap = false;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_slug_from_name() {
        assert_eq!(generate_topic("Animal World!"), "animal-world");
        // a stripped character still leaves the dashes around it
        assert_eq!(generate_topic("  Food &  Drink "), "food--drink");
        assert_eq!(generate_topic("IT"), "it");
        assert_eq!(generate_topic(""), "");
    }

    #[test]
    fn question_shape() {
        let q = Question {
            id: 1,
            question: "2+2=?".into(),
            options: vec!["3".into(), "4".into(), "5".into()],
            answer: "4".into(),
            category: "math".into(),
        };
        assert!(q.is_well_formed());
        let bad = Question { answer: "6".into(), ..q };
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn draft_percent_rounds() {
        let d = QuizDraft {
            date: Utc::now(),
            category: ALL_CATEGORIES.into(),
            score: 2,
            total: 3,
            answers: vec![],
        };
        assert_eq!(d.percent(), 67);
    }
}
