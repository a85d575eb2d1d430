use wordbank_core::{Question, QuizSession, QuizStep, ALL_CATEGORIES};

fn question(id: i64, text: &str, options: &[&str], answer: &str) -> Question {
    Question {
        id,
        question: text.into(),
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.into(),
        category: "math".into(),
    }
}

#[test]
fn single_question_correct() {
    let q = question(1, "2+2=?", &["3", "4", "5"], "4");
    let mut quiz = QuizSession::new(vec![q], ALL_CATEGORIES);
    quiz.select_answer("4");
    let QuizStep::Finished(draft) = quiz.next() else {
        panic!("expected the quiz to finish");
    };
    assert_eq!(draft.score, 1);
    assert_eq!(draft.total, 1);
    assert_eq!(draft.percent(), 100);
    assert_eq!(draft.answers.len(), 1);
    let a = &draft.answers[0];
    assert_eq!(a.question_id, 1);
    assert_eq!(a.selected, "4");
    assert_eq!(a.correct, "4");
    assert!(a.is_correct);
}

#[test]
fn single_question_wrong() {
    let q = question(1, "2+2=?", &["3", "4", "5"], "4");
    let mut quiz = QuizSession::new(vec![q], ALL_CATEGORIES);

    // nothing selected yet, advancing is blocked
    assert_eq!(quiz.next(), QuizStep::NeedSelection);

    quiz.select_answer("3");
    let QuizStep::Finished(draft) = quiz.next() else {
        panic!("expected the quiz to finish");
    };
    assert_eq!(draft.score, 0);
    assert_eq!(draft.total, 1);
    assert!(!draft.answers[0].is_correct);
}

#[test]
fn reanswering_changes_score_by_net_delta() {
    let questions = vec![
        question(1, "2+2=?", &["3", "4"], "4"),
        question(2, "3+3=?", &["5", "6"], "6"),
    ];
    let mut quiz = QuizSession::new(questions, "math");

    quiz.select_answer("3"); // wrong
    assert_eq!(quiz.next(), QuizStep::Advanced);
    assert_eq!(quiz.score(), 0);

    // go back and correct the first answer
    assert_eq!(quiz.previous(), QuizStep::Retreated);
    assert_eq!(quiz.selection(), Some("3"));
    quiz.select_answer("4");
    assert_eq!(quiz.next(), QuizStep::Advanced);
    assert_eq!(quiz.score(), 1);

    quiz.select_answer("6");
    let QuizStep::Finished(draft) = quiz.next() else {
        panic!("expected the quiz to finish");
    };
    // the overwritten record is counted once, not cumulatively
    assert_eq!(draft.score, 2);
    assert_eq!(draft.total, 2);
}

#[test]
fn one_record_per_question_in_question_order() {
    let questions = vec![
        question(10, "q1", &["a", "b"], "a"),
        question(11, "q2", &["a", "b"], "b"),
        question(12, "q3", &["a", "b"], "a"),
    ];
    let mut quiz = QuizSession::new(questions, "math");
    for pick in ["a", "a", "b"] {
        quiz.select_answer(pick);
        quiz.next();
    }
    let draft = quiz.draft();
    let ids: Vec<i64> = draft.answers.iter().map(|a| a.question_id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
    assert_eq!(draft.score, 1);
}

#[test]
fn revisited_question_shows_its_committed_answer() {
    let questions = vec![
        question(1, "q1", &["a", "b"], "a"),
        question(2, "q2", &["a", "b"], "b"),
    ];
    let mut quiz = QuizSession::new(questions, "math");
    quiz.select_answer("a");
    quiz.next();
    quiz.previous();
    assert_eq!(quiz.selection(), Some("a"));
    // advancing again recommits the same record, score unchanged
    quiz.next();
    assert_eq!(quiz.score(), 1);
    assert_eq!(quiz.answered(), 1);
}

#[test]
fn review_mode_navigates_freely_and_stays_finished() {
    let questions = vec![
        question(1, "q1", &["a", "b"], "a"),
        question(2, "q2", &["a", "b"], "b"),
    ];
    let mut quiz = QuizSession::new(questions, "math");
    quiz.select_answer("b");
    quiz.next();
    quiz.select_answer("b");
    let QuizStep::Finished(_) = quiz.next() else {
        panic!("expected the quiz to finish");
    };
    assert!(quiz.finished());

    assert_eq!(quiz.previous(), QuizStep::Retreated);
    assert_eq!(quiz.selection(), Some("b"));
    // selections in review mode change nothing
    quiz.select_answer("a");
    assert_eq!(quiz.selection(), Some("b"));
    assert_eq!(quiz.next(), QuizStep::Advanced);
    assert_eq!(quiz.next(), QuizStep::AtLast);
    assert_eq!(quiz.score(), 1);
}

#[test]
fn draft_for_empty_set_is_empty() {
    let quiz = QuizSession::new(vec![], ALL_CATEGORIES);
    let draft = quiz.draft();
    assert_eq!(draft.total, 0);
    assert_eq!(draft.score, 0);
    assert_eq!(draft.percent(), 0);
    assert!(draft.answers.is_empty());
}
