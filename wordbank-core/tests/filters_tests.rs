use wordbank_core::{
    filter_by_category, filter_questions, partition_by_learned, progress_percent, CategoryFilter,
    Question, VocabEntry, ALL_CATEGORIES,
};

fn entry(id: i64, word: &str, category_id: i64, learned: bool) -> VocabEntry {
    VocabEntry {
        id,
        word: word.into(),
        meaning: format!("meaning of {word}"),
        category_id,
        topic: "t".into(),
        is_learned: learned,
    }
}

#[test]
fn partition_is_complete_and_stable() {
    let v = vec![
        entry(1, "a", 1, false),
        entry(2, "b", 1, true),
        entry(3, "c", 2, false),
        entry(4, "d", 2, true),
    ];
    let (unlearned, learned) = partition_by_learned(&v);
    assert_eq!(unlearned.len() + learned.len(), v.len());
    assert_eq!(
        unlearned.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(learned.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 4]);
}

#[test]
fn progress_is_bounded() {
    assert_eq!(progress_percent(&[]), 0.0);

    let all_learned = vec![entry(1, "a", 1, true), entry(2, "b", 1, true)];
    assert_eq!(progress_percent(&all_learned), 100.0);

    let half = vec![entry(1, "a", 1, true), entry(2, "b", 1, false)];
    let p = progress_percent(&half);
    assert!((0.0..=100.0).contains(&p));
    assert_eq!(p, 50.0);
}

#[test]
fn all_sentinel_keeps_everything() {
    let v = vec![entry(1, "a", 1, false), entry(2, "b", 2, false)];
    assert_eq!(filter_by_category(&v, &CategoryFilter::All).len(), 2);
    let only_two = filter_by_category(&v, &CategoryFilter::Id(2));
    assert_eq!(only_two.len(), 1);
    assert_eq!(only_two[0].id, 2);
}

#[test]
fn question_filter_by_category_and_search() {
    let questions = vec![
        Question {
            id: 1,
            question: "What is a cat?".into(),
            options: vec!["animal".into(), "plant".into()],
            answer: "animal".into(),
            category: "animals".into(),
        },
        Question {
            id: 2,
            question: "What is a rose?".into(),
            options: vec!["animal".into(), "plant".into()],
            answer: "plant".into(),
            category: "plants".into(),
        },
    ];
    assert_eq!(filter_questions(&questions, ALL_CATEGORIES, "").len(), 2);
    assert_eq!(filter_questions(&questions, "animals", "").len(), 1);
    let hits = filter_questions(&questions, ALL_CATEGORIES, "ROSE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
}
