use std::path::PathBuf;

use post_score::config::ScoringConfig;
use post_score::error::{ConfigError, HistoryError};
use post_score::history::ScoreHistory;
use post_score::{evaluate, evaluate_with_config, MediaType, PostMetrics};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("post-score-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn metrics_with_saves(saves: u32) -> PostMetrics {
    PostMetrics {
        saves,
        shares: 2,
        engagement_rate: 4.5,
        hashtag_count: 9,
        is_optimal_time: true,
        content_quality_score: 4,
        video_completion_rate: Some(60.0),
        caption_length: 180,
        has_call_to_action: true,
        media_type: MediaType::Video,
    }
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let path = scratch_dir("missing-config").join("scoring.toml");
    let (config, resolved) = ScoringConfig::load(Some(path.clone())).expect("defaults");
    assert_eq!(resolved, Some(path));
    assert_eq!(config.history.capacity, 50);
    assert_eq!(config.timing.utc_offset_minutes, 0);
    assert!(config.routes.history);
}

#[test]
fn written_config_loads_back() {
    let path = scratch_dir("written-config").join("scoring.toml");
    let mut config = ScoringConfig::default();
    config.weights.saves.weight = 6.0;
    config.suggestions.max_hashtags = 25;
    config.routes.insights = false;
    config.write(&path).expect("write config");

    let (loaded, _) = ScoringConfig::load(Some(path)).expect("load config");
    assert!((loaded.weights.saves.weight - 6.0).abs() < 1e-9);
    assert!((loaded.weights.saves.cap - 40.0).abs() < 1e-9);
    assert_eq!(loaded.suggestions.max_hashtags, 25);
    assert!(!loaded.routes.insights);
    assert_eq!(loaded.timing.optimal_hours, vec![9, 10, 11, 19, 20, 21]);
}

#[test]
fn partial_config_keeps_remaining_defaults() {
    let dir = scratch_dir("partial-config");
    std::fs::create_dir_all(&dir).expect("scratch dir");
    let path = dir.join("scoring.toml");
    std::fs::write(
        &path,
        "[timing]\nutc_offset_minutes = 60\n\n[weights]\ncall_to_action_bonus = 5.0\n",
    )
    .expect("write config");

    let (config, _) = ScoringConfig::load(Some(path)).expect("load config");
    assert_eq!(config.timing.utc_offset_minutes, 60);
    assert_eq!(config.timing.good_hours, vec![8, 12, 13, 18, 22]);
    assert!((config.weights.call_to_action_bonus - 5.0).abs() < 1e-9);
    assert!((config.weights.shares.weight - 8.0).abs() < 1e-9);

    let metrics = metrics_with_saves(3);
    let custom = evaluate_with_config(&metrics, &config);
    let default = evaluate(&metrics);
    assert!((custom.breakdown.raw_total - default.breakdown.raw_total - 3.0).abs() < 1e-9);
}

#[test]
fn invalid_config_is_reported() {
    let dir = scratch_dir("invalid-config");
    std::fs::create_dir_all(&dir).expect("scratch dir");

    let garbled = dir.join("garbled.toml");
    std::fs::write(&garbled, "[weights\nsaves = ").expect("write config");
    assert!(matches!(
        ScoringConfig::load(Some(garbled)),
        Err(ConfigError::Parse { .. })
    ));

    let offset = dir.join("offset.toml");
    std::fs::write(&offset, "[timing]\nutc_offset_minutes = 5000\n").expect("write config");
    assert!(matches!(
        ScoringConfig::load(Some(offset)),
        Err(ConfigError::InvalidOffset(5000))
    ));
}

#[tokio::test]
async fn history_records_and_reloads_entries() {
    let path = scratch_dir("history-reload").join("history.json");
    let history = ScoreHistory::load(path.clone(), 10).await.expect("empty history");
    assert!(history.list().await.is_empty());

    let metrics = metrics_with_saves(4);
    let result = evaluate(&metrics);
    let entry = history
        .record(metrics.clone(), result.clone())
        .await
        .expect("record entry");
    assert!(entry.id.starts_with("score_"));
    assert_eq!(entry.result.score, result.score);

    let found = history.get(&entry.id).await.expect("entry by id");
    assert_eq!(found.metrics, metrics);

    let reloaded = ScoreHistory::load(path, 10).await.expect("reload history");
    let entries = reloaded.list().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry.id);
    assert_eq!(entries[0].metrics, metrics);
    assert_eq!(entries[0].result.score, result.score);
    assert_eq!(entries[0].result.suggestions, result.suggestions);
}

#[tokio::test]
async fn history_keeps_newest_entries_up_to_capacity() {
    let path = scratch_dir("history-capacity").join("history.json");
    let history = ScoreHistory::load(path, 2).await.expect("empty history");

    for saves in [1, 2, 3] {
        let metrics = metrics_with_saves(saves);
        let result = evaluate(&metrics);
        history.record(metrics, result).await.expect("record entry");
    }

    let saves: Vec<u32> = history
        .list()
        .await
        .iter()
        .map(|entry| entry.metrics.saves)
        .collect();
    assert_eq!(saves, vec![3, 2]);
}

#[tokio::test]
async fn history_delete_and_validation() {
    let path = scratch_dir("history-delete").join("history.json");
    let history = ScoreHistory::load(path, 5).await.expect("empty history");

    let metrics = metrics_with_saves(1);
    let entry = history
        .record(metrics.clone(), evaluate(&metrics))
        .await
        .expect("record entry");

    history.delete(&entry.id).await.expect("delete entry");
    assert!(history.get(&entry.id).await.is_none());
    assert!(matches!(
        history.delete(&entry.id).await,
        Err(HistoryError::NotFound(_))
    ));

    let mut invalid = metrics_with_saves(1);
    invalid.content_quality_score = 9;
    let result = evaluate(&invalid);
    assert!(matches!(
        history.record(invalid, result).await,
        Err(HistoryError::Invalid(_))
    ));
    assert!(history.list().await.is_empty());
}

#[tokio::test]
async fn failed_writes_leave_history_unchanged() {
    let dir = scratch_dir("history-unwritable");
    std::fs::create_dir_all(&dir).expect("scratch dir");
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write blocker");

    let history = ScoreHistory::load(blocker.join("history.json"), 5)
        .await
        .expect("empty history");
    let metrics = metrics_with_saves(2);
    let result = evaluate(&metrics);
    assert!(matches!(
        history.record(metrics, result).await,
        Err(HistoryError::Io(_))
    ));
    assert!(history.list().await.is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_the_entry() {
    let dir = scratch_dir("history-delete-unwritable");
    let path = dir.join("history.json");
    let history = ScoreHistory::load(path.clone(), 5).await.expect("empty history");
    let metrics = metrics_with_saves(3);
    let entry = history
        .record(metrics.clone(), evaluate(&metrics))
        .await
        .expect("record entry");

    // A directory at the temp-file path makes the next write fail.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::create_dir_all(&tmp_path).expect("block temp file");
    assert!(history.delete(&entry.id).await.is_err());
    assert!(history.get(&entry.id).await.is_some());

    std::fs::remove_dir_all(&tmp_path).expect("unblock temp file");
    history.delete(&entry.id).await.expect("delete entry");
    assert!(history.list().await.is_empty());
}
