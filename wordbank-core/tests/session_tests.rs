use wordbank_core::{
    CategoryFilter, FlashcardSession, MarkOutcome, StudySignal, VocabEntry,
};

fn entry(id: i64, word: &str, meaning: &str, category_id: i64, learned: bool) -> VocabEntry {
    VocabEntry {
        id,
        word: word.into(),
        meaning: meaning.into(),
        category_id,
        topic: "animals".into(),
        is_learned: learned,
    }
}

#[test]
fn mark_then_advance_over_two_cards() {
    let vocabs = vec![
        entry(1, "cat", "con mèo", 1, false),
        entry(2, "dog", "con chó", 1, false),
    ];
    let mut s = FlashcardSession::new(vocabs, CategoryFilter::All);
    assert_eq!(s.current().unwrap().word, "cat");

    let out = s.mark_learned();
    assert_eq!(out, MarkOutcome::Marked { id: 1, complete: false });

    // cursor clamped onto the shrunken view; "dog" is now current
    assert_eq!(s.current().unwrap().word, "dog");
    assert_eq!(s.progress(), 50.0);

    // one unlearned card left, so next() reports the end of the deck
    assert_eq!(s.next(), StudySignal::EndOfDeck { remaining: 1 });
}

#[test]
fn learned_cards_never_reappear() {
    let vocabs = vec![
        entry(1, "cat", "con mèo", 1, false),
        entry(2, "dog", "con chó", 1, false),
        entry(3, "fish", "con cá", 1, false),
    ];
    let mut s = FlashcardSession::new(vocabs, CategoryFilter::All);
    let MarkOutcome::Marked { id, .. } = s.mark_learned() else {
        panic!("expected a marked card");
    };
    for _ in 0..5 {
        s.next();
        assert!(s.view().iter().all(|e| e.id != id));
    }
    s.previous();
    assert!(s.view().iter().all(|e| e.id != id));
}

#[test]
fn cursor_stays_in_bounds() {
    let vocabs = vec![
        entry(1, "a", "x", 1, false),
        entry(2, "b", "y", 1, false),
        entry(3, "c", "z", 2, false),
    ];
    let mut s = FlashcardSession::new(vocabs, CategoryFilter::All);
    s.next();
    s.next();
    s.next(); // at end, no move
    s.mark_learned();
    s.mark_learned();
    s.previous();
    s.mark_learned();
    let len = s.view().len();
    assert!(s.cursor() <= len.saturating_sub(1).max(0));
}

#[test]
fn previous_at_first_is_informational() {
    let mut s = FlashcardSession::new(vec![entry(1, "a", "x", 1, false)], CategoryFilter::All);
    assert_eq!(s.previous(), StudySignal::AtFirst);
    assert_eq!(s.current().unwrap().word, "a");
}

#[test]
fn flip_only_toggles_face() {
    let mut s = FlashcardSession::new(vec![entry(1, "a", "x", 1, false)], CategoryFilter::All);
    assert!(!s.face_up());
    s.flip();
    assert!(s.face_up());
    s.flip();
    assert!(!s.face_up());
    assert_eq!(s.current().unwrap().word, "a");
}

#[test]
fn advancing_resets_the_face() {
    let vocabs = vec![entry(1, "a", "x", 1, false), entry(2, "b", "y", 1, false)];
    let mut s = FlashcardSession::new(vocabs, CategoryFilter::All);
    s.flip();
    assert_eq!(s.next(), StudySignal::Advanced);
    assert!(!s.face_up());
}

#[test]
fn marking_the_last_card_completes_the_session() {
    let mut s = FlashcardSession::new(vec![entry(1, "a", "x", 1, false)], CategoryFilter::All);
    assert_eq!(s.mark_learned(), MarkOutcome::Marked { id: 1, complete: true });
    assert_eq!(s.current(), None);
    assert_eq!(s.next(), StudySignal::AllLearned);
    assert_eq!(s.mark_learned(), MarkOutcome::NoCurrent);
    assert_eq!(s.progress(), 100.0);
}

#[test]
fn changing_the_filter_resets_the_cursor() {
    let vocabs = vec![
        entry(1, "a", "x", 1, false),
        entry(2, "b", "y", 1, false),
        entry(3, "c", "z", 2, false),
    ];
    let mut s = FlashcardSession::new(vocabs, CategoryFilter::All);
    s.next();
    s.flip();
    s.set_filter(CategoryFilter::Id(2));
    assert_eq!(s.cursor(), 0);
    assert!(!s.face_up());
    assert_eq!(s.current().unwrap().word, "c");
    assert_eq!(s.view().len(), 1);
}
