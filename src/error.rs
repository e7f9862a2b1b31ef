use std::path::PathBuf;

/// Rejections raised at the input boundary, before anything is scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("engagementRate must be a finite number >= 0, got {0}")]
    InvalidEngagementRate(f64),

    #[error("contentQualityScore must be between 0 and 5, got {0}")]
    InvalidQualityScore(u8),

    #[error("videoCompletionRate must be a finite percentage between 0 and 100, got {0}")]
    InvalidVideoCompletion(f64),

    #[error("invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history data is malformed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("history entry not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] MetricsError),
}
