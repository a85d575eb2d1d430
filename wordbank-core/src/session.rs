use crate::{filter_by_category, progress_percent, CategoryFilter, VocabEntry, VocabId};

/// Outcome of a flashcard navigation step. None of these are errors; the
/// boundary cases are information for the caller to surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudySignal {
    Advanced,
    Retreated,
    /// Already on the first card.
    AtFirst,
    /// On the last card with unlearned items still in the deck.
    EndOfDeck { remaining: usize },
    /// The filtered deck has no unlearned items left.
    AllLearned,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The entry was flagged learned; `complete` means the filtered view is
    /// now empty. The id is handed back so the caller can persist the flag.
    Marked { id: VocabId, complete: bool },
    /// Empty view, nothing to mark.
    NoCurrent,
}

/// Cursor over the unlearned subset of a vocab collection, one card at a
/// time, with a question/answer face toggle. The unlearned view is
/// recomputed after every mutation since marking a card learned removes it
/// and shifts the indices behind it.
pub struct FlashcardSession {
    entries: Vec<VocabEntry>,
    filter: CategoryFilter,
    cursor: usize,
    face_up: bool,
}

impl FlashcardSession {
    pub fn new(entries: Vec<VocabEntry>, filter: CategoryFilter) -> Self {
        Self { entries, filter, cursor: 0, face_up: false }
    }

    /// The current unlearned view under the active filter.
    pub fn view(&self) -> Vec<&VocabEntry> {
        self.entries
            .iter()
            .filter(|e| self.filter.matches(e) && !e.is_learned)
            .collect()
    }

    pub fn current(&self) -> Option<&VocabEntry> {
        self.view().get(self.cursor).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn face_up(&self) -> bool {
        self.face_up
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Learned percentage of the filtered deck (learned and unlearned).
    pub fn progress(&self) -> f32 {
        progress_percent(&filter_by_category(&self.entries, &self.filter))
    }

    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    pub fn next(&mut self) -> StudySignal {
        let len = self.view().len();
        if len == 0 {
            return StudySignal::AllLearned;
        }
        if self.cursor < len - 1 {
            self.cursor += 1;
            self.face_up = false;
            StudySignal::Advanced
        } else {
            StudySignal::EndOfDeck { remaining: len }
        }
    }

    pub fn previous(&mut self) -> StudySignal {
        if self.cursor == 0 {
            return StudySignal::AtFirst;
        }
        self.cursor -= 1;
        self.face_up = false;
        StudySignal::Retreated
    }

    /// Flags the current card learned in the source collection. Irreversible
    /// within the session; the cursor is clamped to the recomputed view.
    pub fn mark_learned(&mut self) -> MarkOutcome {
        let Some(id) = self.current().map(|e| e.id) else {
            return MarkOutcome::NoCurrent;
        };
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.is_learned = true;
        }
        let len = self.view().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.face_up = false;
        MarkOutcome::Marked { id, complete: len == 0 }
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.cursor = 0;
        self.face_up = false;
    }
}
