use chrono::Utc;
use wordbank_core::{CoreError, QuizDraft, Repository};
use wordbank_json::JsonStore;

async fn open_in(dir: &tempfile::TempDir) -> JsonStore {
    JsonStore::open_with(
        dir.path().join("wordbank.json"),
        dir.path().join("backups"),
        3,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn data_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = open_in(&dir).await;
        let cat = store.create_category("Animals", Some("fauna")).await.unwrap();
        let v = store.add_vocab("cat", "con mèo", cat.id, &cat.topic).await.unwrap();
        store.set_learned(v.id).await.unwrap();
        store
            .save_result(&QuizDraft {
                date: Utc::now(),
                category: "animals".into(),
                score: 3,
                total: 5,
                answers: vec![],
            })
            .await
            .unwrap();
    }

    let store = open_in(&dir).await;
    let cats = store.list_categories(None).await.unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].topic, "animals");

    let vocabs = store.list_vocabs(None).await.unwrap();
    assert_eq!(vocabs.len(), 1);
    assert!(vocabs[0].is_learned);

    let results = store.list_results().await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 3);
}

#[tokio::test]
async fn ids_keep_increasing_across_reopens() {
    let dir = tempfile::tempdir().unwrap();

    let first = {
        let store = open_in(&dir).await;
        store.create_category("Animals", None).await.unwrap().id
    };

    let store = open_in(&dir).await;
    let second = store.create_category("Plants", None).await.unwrap().id;
    assert!(second > first);
}

#[tokio::test]
async fn conflicts_leave_the_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_in(&dir).await;
    store.create_category("Animals", None).await.unwrap();

    let err = store.create_category("ANIMALS", None).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(_)));

    let store = open_in(&dir).await;
    assert_eq!(store.list_categories(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn backups_are_rotated() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_in(&dir).await;
    for name in ["A", "B", "C", "D", "E"] {
        store.create_category(name, None).await.unwrap();
    }
    let backups = std::fs::read_dir(dir.path().join("backups"))
        .unwrap()
        .filter_map(|e| e.ok())
        .count();
    assert!(backups <= 3);
}
