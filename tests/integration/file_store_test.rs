use starkvideo::{
    models::{
        generation::VideoStyle,
        history::HistoryEntry,
        preferences::{Preferences, Theme},
    },
    store::{JsonFileStore, LocalStore},
};

fn entry(n: usize) -> HistoryEntry {
    HistoryEntry::new(format!("prompt {}", n), VideoStyle::Cartoon, 8, Some(format!("job-{}", n)))
}

#[tokio::test]
async fn missing_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested"), 50);

    assert!(store.load_history().await.unwrap().is_empty());
    assert_eq!(store.load_preferences().await.unwrap(), Preferences::default());
}

#[tokio::test]
async fn history_survives_reopening_and_stays_bounded() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = JsonFileStore::new(dir.path(), 3);
        for n in 0..5 {
            store.append_history(entry(n)).await.unwrap();
        }
    }

    let reopened = JsonFileStore::new(dir.path(), 3);
    let history = reopened.load_history().await.unwrap();
    let prompts: Vec<&str> = history.iter().map(|e| e.prompt.as_str()).collect();
    assert_eq!(prompts, vec!["prompt 4", "prompt 3", "prompt 2"]);
    assert_eq!(history[0].job_id.as_deref(), Some("job-4"));
}

#[tokio::test]
async fn preferences_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path(), 50);

    let preferences = Preferences {
        video_style: Some(VideoStyle::ThreeDAnimation),
        video_length: Some(10),
        aspect_ratio: Some("9:16".to_string()),
        theme: Theme::Dark,
    };
    store.save_preferences(&preferences).await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("preferences.json")).unwrap();
    assert!(raw.contains("\"videoStyle\": \"3d-animation\""));
    assert_eq!(store.load_preferences().await.unwrap(), preferences);
}

#[tokio::test]
async fn corrupt_history_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("history.json"), b"{not json").unwrap();

    let store = JsonFileStore::new(dir.path(), 50);
    assert!(store.load_history().await.unwrap().is_empty());

    store.append_history(entry(1)).await.unwrap();
    assert_eq!(store.load_history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_appends_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store = std::sync::Arc::new(JsonFileStore::new(dir.path(), 50));

    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..10 {
        let store = store.clone();
        tasks.spawn(async move { store.append_history(entry(n)).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(store.load_history().await.unwrap().len(), 10);
}

#[tokio::test]
async fn configured_capacity_cannot_exceed_fifty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path(), 80);
    for n in 0..60 {
        store.append_history(entry(n)).await.unwrap();
    }

    let history = store.load_history().await.unwrap();
    assert_eq!(history.len(), 50);
    assert_eq!(history[0].prompt, "prompt 59");
}
