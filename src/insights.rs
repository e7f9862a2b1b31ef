use serde::{Deserialize, Serialize};

use crate::caption::analyze_caption;
use crate::config::ScoringConfig;
use crate::error::MetricsError;
use crate::scoring::calculate_content_quality_score;
use crate::{MediaType, PostMetrics};

/// Raw per-post numbers as stored by the publishing side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInsights {
    #[serde(default)]
    pub caption: String,
    pub media_type: MediaType,
    pub timestamp: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub video_completion_rate: Option<f64>,
}

impl PostInsights {
    /// Interactions per reached account, as a percentage. Zero reach gives zero.
    pub fn engagement_rate(&self) -> f64 {
        if self.reach == 0 {
            return 0.0;
        }
        let interactions =
            self.likes + self.comments + u64::from(self.saves) + u64::from(self.shares);
        interactions as f64 / self.reach as f64 * 100.0
    }

    pub fn to_metrics(&self, config: &ScoringConfig) -> Result<PostMetrics, MetricsError> {
        let caption = analyze_caption(&self.caption);
        let is_optimal_time = config.timing.is_optimal(&self.timestamp)?;
        let content_quality_score = calculate_content_quality_score(
            caption.char_count,
            caption.hashtag_count,
            self.media_type,
            caption.has_call_to_action,
        );

        let video_completion_rate = match self.media_type {
            MediaType::Video => self.video_completion_rate,
            _ => None,
        };

        let metrics = PostMetrics {
            saves: self.saves,
            shares: self.shares,
            engagement_rate: self.engagement_rate(),
            hashtag_count: caption.hashtag_count,
            is_optimal_time,
            content_quality_score,
            video_completion_rate,
            caption_length: caption.char_count,
            has_call_to_action: caption.has_call_to_action,
            media_type: self.media_type,
        };
        metrics.validate()?;
        Ok(metrics)
    }
}
