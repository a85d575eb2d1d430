use crate::{AnswerRecord, Question, QuestionId, QuizDraft};
use chrono::Utc;
use std::collections::HashMap;

/// Outcome of a quiz navigation step.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizStep {
    Advanced,
    Retreated,
    AtFirst,
    /// Review mode only: already on the last question.
    AtLast,
    /// `next()` is blocked until the current question has a selection.
    NeedSelection,
    /// The last answer was committed; the draft is ready to persist.
    Finished(QuizDraft),
}

/// One pass over a fixed question set. Selections are staged as `pending`
/// and only committed into the answer map on navigation, so `previous()`
/// can re-show an uncommitted choice. The map is keyed by question id:
/// revisiting a question overwrites its record, never duplicates it, and
/// the score is always derived from the map rather than accumulated.
pub struct QuizSession {
    questions: Vec<Question>,
    category: String,
    cursor: usize,
    pending: Option<String>,
    answers: HashMap<QuestionId, AnswerRecord>,
    finished: bool,
}

impl QuizSession {
    /// The question set is fixed at start time; later filter changes do not
    /// reach an active session.
    pub fn new(questions: Vec<Question>, category: impl Into<String>) -> Self {
        Self {
            questions,
            category: category.into(),
            cursor: 0,
            pending: None,
            answers: HashMap::new(),
            finished: false,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Running score, derived from the committed records.
    pub fn score(&self) -> u32 {
        self.answers.values().filter(|a| a.is_correct).count() as u32
    }

    /// The selection shown for the current question: pending if staged,
    /// otherwise the committed one from an earlier visit.
    pub fn selection(&self) -> Option<&str> {
        if let Some(p) = self.pending.as_deref() {
            return Some(p);
        }
        self.committed_selection()
    }

    pub fn record_for(&self, id: QuestionId) -> Option<&AnswerRecord> {
        self.answers.get(&id)
    }

    pub fn select_answer(&mut self, option: impl Into<String>) {
        if !self.finished {
            self.pending = Some(option.into());
        }
    }

    pub fn next(&mut self) -> QuizStep {
        if self.finished {
            // review mode: navigation is free, nothing is recommitted
            if self.cursor + 1 < self.questions.len() {
                self.cursor += 1;
                QuizStep::Advanced
            } else {
                QuizStep::AtLast
            }
        } else {
            let Some(selected) = self.selection().map(str::to_owned) else {
                return QuizStep::NeedSelection;
            };
            let Some(question) = self.questions.get(self.cursor) else {
                return QuizStep::NeedSelection;
            };
            let record = AnswerRecord {
                question_id: question.id,
                is_correct: selected == question.answer,
                correct: question.answer.clone(),
                selected,
            };
            self.answers.insert(question.id, record);
            self.pending = None;

            if self.cursor + 1 < self.questions.len() {
                self.cursor += 1;
                self.pending = self.committed_selection().map(str::to_owned);
                QuizStep::Advanced
            } else {
                self.finished = true;
                QuizStep::Finished(self.draft())
            }
        }
    }

    pub fn previous(&mut self) -> QuizStep {
        if self.cursor == 0 {
            return QuizStep::AtFirst;
        }
        self.cursor -= 1;
        if !self.finished {
            self.pending = self.committed_selection().map(str::to_owned);
        }
        QuizStep::Retreated
    }

    /// The persistable outcome: one record per question, in question order.
    pub fn draft(&self) -> QuizDraft {
        QuizDraft {
            date: Utc::now(),
            category: self.category.clone(),
            score: self.score(),
            total: self.questions.len() as u32,
            answers: self
                .questions
                .iter()
                .filter_map(|q| self.answers.get(&q.id).cloned())
                .collect(),
        }
    }

    fn committed_selection(&self) -> Option<&str> {
        let q = self.questions.get(self.cursor)?;
        self.answers.get(&q.id).map(|a| a.selected.as_str())
    }
}
