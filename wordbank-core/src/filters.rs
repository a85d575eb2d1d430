use crate::{CategoryId, Question, VocabEntry, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};

/// Category selector used by the study and quiz screens. `All` is the
/// sentinel that leaves the collection unfiltered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &VocabEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Id(id) => entry.category_id == *id,
        }
    }
}

pub fn filter_by_category(entries: &[VocabEntry], filter: &CategoryFilter) -> Vec<VocabEntry> {
    entries.iter().filter(|e| filter.matches(e)).cloned().collect()
}

/// Stable partition into (unlearned, learned), input order preserved.
pub fn partition_by_learned(entries: &[VocabEntry]) -> (Vec<VocabEntry>, Vec<VocabEntry>) {
    entries.iter().cloned().partition(|e| !e.is_learned)
}

pub fn progress_percent(entries: &[VocabEntry]) -> f32 {
    if entries.is_empty() {
        return 0.0;
    }
    let learned = entries.iter().filter(|e| e.is_learned).count();
    100.0 * learned as f32 / entries.len() as f32
}

/// Question list filter used by the quiz screen: category sentinel plus a
/// case-insensitive substring match on the question text.
pub fn filter_questions(questions: &[Question], category: &str, search: &str) -> Vec<Question> {
    let needle = search.trim().to_lowercase();
    questions
        .iter()
        .filter(|q| category == ALL_CATEGORIES || q.category == category)
        .filter(|q| needle.is_empty() || q.question.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
