use chrono::Utc;
use wordbank_core::{repo::memory::MemoryRepo, CoreError, QuizDraft, Repository};

#[tokio::test]
async fn duplicate_category_name_is_rejected_case_insensitively() {
    let repo = MemoryRepo::new();
    repo.create_category("Animals", None).await.unwrap();

    let err = repo.create_category("animals", None).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    // nothing was appended
    let cats = repo.list_categories(None).await.unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "Animals");
    assert_eq!(cats[0].topic, "animals");
}

#[tokio::test]
async fn category_topic_follows_the_name_on_update() {
    let repo = MemoryRepo::new();
    let mut cat = repo.create_category("Animal World!", None).await.unwrap();
    assert_eq!(cat.topic, "animal-world");

    cat.name = "Sea Creatures".into();
    let updated = repo.update_category(&cat).await.unwrap();
    assert_eq!(updated.topic, "sea-creatures");
}

#[tokio::test]
async fn topic_query_filters_categories() {
    let repo = MemoryRepo::new();
    repo.create_category("Animals", None).await.unwrap();
    repo.create_category("Plants", None).await.unwrap();

    let hits = repo.list_categories(Some("plants")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Plants");
}

#[tokio::test]
async fn vocab_requires_an_existing_category() {
    let repo = MemoryRepo::new();
    let err = repo.add_vocab("cat", "con mèo", 99, "animals").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));

    let cat = repo.create_category("Animals", None).await.unwrap();
    let v = repo.add_vocab("cat", "con mèo", cat.id, &cat.topic).await.unwrap();
    assert!(!v.is_learned);

    // same word under the same topic conflicts
    let err = repo.add_vocab(" CAT ", "mèo", cat.id, &cat.topic).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn set_learned_is_idempotent_and_never_resets() {
    let repo = MemoryRepo::new();
    let cat = repo.create_category("Animals", None).await.unwrap();
    let v = repo.add_vocab("dog", "con chó", cat.id, &cat.topic).await.unwrap();

    let once = repo.set_learned(v.id).await.unwrap();
    assert!(once.is_learned);
    let twice = repo.set_learned(v.id).await.unwrap();
    assert!(twice.is_learned);

    // an admin edit cannot clear the flag
    let mut edited = twice.clone();
    edited.meaning = "chó".into();
    edited.is_learned = false;
    let saved = repo.update_vocab(&edited).await.unwrap();
    assert!(saved.is_learned);

    let err = repo.set_learned(9999).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn question_answer_must_be_an_option() {
    let repo = MemoryRepo::new();
    let options = vec!["3".to_string(), "4".to_string()];
    let err = repo.add_question("2+2=?", &options, "5", "math").await.unwrap_err();
    assert!(matches!(err, CoreError::Invalid(_)));

    let q = repo.add_question("2+2=?", &options, "4", "math").await.unwrap();
    assert_eq!(q.answer, "4");

    let err = repo.add_question("2+2=? ", &options, "4", "math").await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));
}

#[tokio::test]
async fn register_login_roundtrip() {
    let repo = MemoryRepo::new();
    let u = repo
        .register_user("Minh", "Tran", "minh@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(u.role, "user");

    let err = repo
        .register_user("Other", "Person", "MINH@example.com", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    let found = repo.login("minh@example.com", "secret").await.unwrap();
    assert_eq!(found.id, u.id);
    let err = repo.login("minh@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn results_are_appended_and_listed() {
    let repo = MemoryRepo::new();
    let draft = QuizDraft {
        date: Utc::now(),
        category: "math".into(),
        score: 1,
        total: 2,
        answers: vec![],
    };
    let saved = repo.save_result(&draft).await.unwrap();
    assert!(saved.id > 0);
    let all = repo.list_results().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].score, 1);
}
