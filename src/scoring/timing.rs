use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MetricsError};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingWindow {
    Optimal,
    Good,
    Off,
}

impl PostingWindow {
    pub fn label(self) -> &'static str {
        match self {
            PostingWindow::Optimal => "optimal",
            PostingWindow::Good => "good",
            PostingWindow::Off => "off-peak",
        }
    }
}

/// Engagement windows, read in a fixed UTC offset rather than host time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingWindows {
    pub optimal_hours: Vec<u32>,
    pub good_hours: Vec<u32>,
    pub utc_offset_minutes: i32,
}

impl Default for PostingWindows {
    fn default() -> Self {
        Self {
            optimal_hours: vec![9, 10, 11, 19, 20, 21],
            good_hours: vec![8, 12, 13, 18, 22],
            utc_offset_minutes: 0,
        }
    }
}

impl PostingWindows {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked_zone()
            .map(|_| ())
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
    }

    pub fn window(&self, hour: u32) -> PostingWindow {
        if self.optimal_hours.contains(&hour) {
            PostingWindow::Optimal
        } else if self.good_hours.contains(&hour) {
            PostingWindow::Good
        } else {
            PostingWindow::Off
        }
    }

    /// Hour of day in the configured zone. Timestamps without an offset are
    /// taken to already be in that zone.
    pub fn hour_of(&self, timestamp: &str) -> Result<u32, MetricsError> {
        let trimmed = timestamp.trim();
        let zone = self.zone();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(parsed.with_timezone(&zone).hour());
        }
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Ok(parsed.with_timezone(&zone).hour());
        }
        for format in NAIVE_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(parsed.hour());
            }
        }
        if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
            return Ok(0);
        }

        Err(MetricsError::InvalidTimestamp(timestamp.to_string()))
    }

    pub fn classify(&self, timestamp: &str) -> Result<PostingWindow, MetricsError> {
        Ok(self.window(self.hour_of(timestamp)?))
    }

    /// Optimal and good windows both count.
    pub fn is_optimal(&self, timestamp: &str) -> Result<bool, MetricsError> {
        Ok(self.classify(timestamp)? != PostingWindow::Off)
    }

    fn checked_zone(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }

    fn zone(&self) -> FixedOffset {
        self.checked_zone().unwrap_or_else(|| Utc.fix())
    }
}

/// Unparseable timestamps are never optimal.
pub fn is_optimal_posting_time(timestamp: &str) -> bool {
    PostingWindows::default()
        .is_optimal(timestamp)
        .unwrap_or(false)
}
