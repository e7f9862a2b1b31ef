use post_score::config::ScoringConfig;
use post_score::error::MetricsError;
use post_score::scoring::{is_optimal_posting_time, PostingWindow, PostingWindows};
use post_score::{evaluate, evaluate_checked, MediaType, PostMetrics};

#[test]
fn morning_peak_is_optimal() {
    assert!(is_optimal_posting_time("2024-01-01T09:00:00"));
}

#[test]
fn small_hours_are_not_optimal() {
    assert!(!is_optimal_posting_time("2024-01-01T03:00:00"));
}

#[test]
fn good_hours_also_count_as_optimal() {
    let windows = PostingWindows::default();
    assert_eq!(windows.classify("2024-01-01T12:30:00"), Ok(PostingWindow::Good));
    assert!(is_optimal_posting_time("2024-01-01T12:30:00"));
    assert!(is_optimal_posting_time("2024-01-01T22:59:59"));
    assert!(!is_optimal_posting_time("2024-01-01T23:00:00"));
}

#[test]
fn every_hour_has_one_window() {
    let windows = PostingWindows::default();
    let optimal: Vec<u32> = (0..24)
        .filter(|hour| windows.window(*hour) == PostingWindow::Optimal)
        .collect();
    let good: Vec<u32> = (0..24)
        .filter(|hour| windows.window(*hour) == PostingWindow::Good)
        .collect();
    assert_eq!(optimal, vec![9, 10, 11, 19, 20, 21]);
    assert_eq!(good, vec![8, 12, 13, 18, 22]);
}

#[test]
fn accepts_common_timestamp_shapes() {
    let windows = PostingWindows::default();
    assert_eq!(windows.hour_of("2024-01-01T09:00:00Z"), Ok(9));
    assert_eq!(windows.hour_of("2024-01-01T09:00:00.123Z"), Ok(9));
    assert_eq!(windows.hour_of("2024-01-01T11:00:00+02:00"), Ok(9));
    assert_eq!(windows.hour_of("2024-01-01T11:00:00+0200"), Ok(9));
    assert_eq!(windows.hour_of("2024-01-01T19:45"), Ok(19));
    assert_eq!(windows.hour_of("2024-01-01 20:15:00"), Ok(20));
    assert_eq!(windows.hour_of("2024-01-01"), Ok(0));
}

#[test]
fn zoned_timestamps_convert_into_configured_offset() {
    let windows = PostingWindows {
        utc_offset_minutes: -300,
        ..PostingWindows::default()
    };
    assert_eq!(windows.hour_of("2024-01-01T14:00:00Z"), Ok(9));
    assert_eq!(windows.is_optimal("2024-01-01T14:00:00Z"), Ok(true));
    // no offset in the input: read as local to the configured zone
    assert_eq!(windows.hour_of("2024-01-01T14:00:00"), Ok(14));
    assert_eq!(windows.is_optimal("2024-01-01T14:00:00"), Ok(false));
}

#[test]
fn unparseable_timestamps_are_rejected() {
    let windows = PostingWindows::default();
    assert_eq!(
        windows.hour_of("yesterday at nine"),
        Err(MetricsError::InvalidTimestamp("yesterday at nine".to_string()))
    );
    assert!(!is_optimal_posting_time("yesterday at nine"));
    assert!(!is_optimal_posting_time(""));
}

#[test]
fn out_of_range_offset_fails_validation() {
    let windows = PostingWindows {
        utc_offset_minutes: 24 * 60,
        ..PostingWindows::default()
    };
    assert!(windows.validate().is_err());
    assert!(PostingWindows::default().validate().is_ok());
}

#[test]
fn validation_rejects_out_of_domain_values() {
    assert!(PostMetrics::default().validate().is_ok());

    let mut metrics = PostMetrics::default();
    metrics.engagement_rate = f64::NAN;
    assert!(matches!(
        metrics.validate(),
        Err(MetricsError::InvalidEngagementRate(_))
    ));

    metrics.engagement_rate = -0.5;
    assert_eq!(
        metrics.validate(),
        Err(MetricsError::InvalidEngagementRate(-0.5))
    );

    let mut metrics = PostMetrics::default();
    metrics.content_quality_score = 6;
    assert_eq!(metrics.validate(), Err(MetricsError::InvalidQualityScore(6)));

    let mut metrics = PostMetrics::default();
    metrics.media_type = MediaType::Video;
    metrics.video_completion_rate = Some(100.5);
    assert_eq!(
        metrics.validate(),
        Err(MetricsError::InvalidVideoCompletion(100.5))
    );
    metrics.video_completion_rate = Some(100.0);
    assert!(metrics.validate().is_ok());
}

#[test]
fn evaluate_checked_validates_before_scoring() {
    let config = ScoringConfig::default();
    let mut metrics = PostMetrics::default();
    metrics.engagement_rate = f64::INFINITY;
    assert!(evaluate_checked(&metrics, &config).is_err());

    metrics.engagement_rate = 4.0;
    let result = evaluate_checked(&metrics, &config).expect("valid metrics");
    assert_eq!(result, evaluate(&metrics));
}

#[test]
fn metrics_use_camel_case_json() {
    let json = r#"{
        "saves": 5,
        "shares": 3,
        "engagementRate": 10,
        "hashtagCount": 8,
        "isOptimalTime": true,
        "contentQualityScore": 4,
        "captionLength": 200,
        "hasCallToAction": true,
        "mediaType": "IMAGE"
    }"#;
    let metrics: PostMetrics = serde_json::from_str(json).expect("valid metrics json");
    assert_eq!(metrics.video_completion_rate, None);
    assert_eq!(evaluate(&metrics).score, 89);

    let value = serde_json::to_value(evaluate(&metrics)).expect("serializable result");
    assert_eq!(value["score"], 89);
    assert_eq!(value["level"]["name"], "Excellent");
    assert_eq!(value["level"]["colorToken"], "green");
    assert!(value["suggestions"].as_array().is_some());
}

#[test]
fn malformed_json_is_rejected_at_the_boundary() {
    let base = r#""engagementRate": 1, "hashtagCount": 0, "isOptimalTime": false,
        "contentQualityScore": 0, "captionLength": 0, "hasCallToAction": false"#;

    let negative = format!(r#"{{"saves": -1, "shares": 0, {base}, "mediaType": "IMAGE"}}"#);
    assert!(serde_json::from_str::<PostMetrics>(&negative).is_err());

    let fractional = format!(r#"{{"saves": 1.5, "shares": 0, {base}, "mediaType": "IMAGE"}}"#);
    assert!(serde_json::from_str::<PostMetrics>(&fractional).is_err());

    let unknown_media = format!(r#"{{"saves": 1, "shares": 0, {base}, "mediaType": "STORY"}}"#);
    assert!(serde_json::from_str::<PostMetrics>(&unknown_media).is_err());

    let ok = format!(r#"{{"saves": 1, "shares": 0, {base}, "mediaType": "CAROUSEL_ALBUM"}}"#);
    let metrics: PostMetrics = serde_json::from_str(&ok).expect("valid metrics json");
    assert_eq!(metrics.media_type, MediaType::CarouselAlbum);
}

#[test]
fn media_type_parses_cli_aliases() {
    assert_eq!(MediaType::from_str("Reel"), Some(MediaType::Video));
    assert_eq!(MediaType::from_str("carousel"), Some(MediaType::CarouselAlbum));
    assert_eq!(MediaType::from_str(" photo "), Some(MediaType::Image));
    assert_eq!(
        MediaType::parse("story"),
        Err(MetricsError::InvalidMediaType("story".to_string()))
    );
    assert_eq!(MediaType::CarouselAlbum.label(), "CAROUSEL_ALBUM");
}
