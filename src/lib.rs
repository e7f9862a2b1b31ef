pub mod caption;
pub mod config;
pub mod error;
pub mod history;
pub mod insights;
pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::MetricsError;
use crate::scoring::{
    get_score_level, AlgorithmScorer, LevelSummary, ScoreBreakdown, Suggestion, SuggestionRules,
    MAX_CONTENT_QUALITY,
};

pub use crate::caption::{analyze_caption, CaptionFeatures};
pub use crate::insights::PostInsights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
    CarouselAlbum,
}

impl MediaType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "image" | "photo" | "pic" => Some(MediaType::Image),
            "video" | "reel" | "vid" => Some(MediaType::Video),
            "carousel_album" | "carousel" | "album" => Some(MediaType::CarouselAlbum),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Result<Self, MetricsError> {
        Self::from_str(value).ok_or_else(|| MetricsError::InvalidMediaType(value.to_string()))
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
            MediaType::CarouselAlbum => "CAROUSEL_ALBUM",
        }
    }

    /// Video and carousel posts get extra distribution.
    pub fn is_rich(self) -> bool {
        matches!(self, MediaType::Video | MediaType::CarouselAlbum)
    }
}

/// Engagement inputs for a single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetrics {
    pub saves: u32,
    pub shares: u32,
    /// (likes + comments + saves + shares) / reach, as a percentage.
    pub engagement_rate: f64,
    pub hashtag_count: u32,
    pub is_optimal_time: bool,
    pub content_quality_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_completion_rate: Option<f64>,
    pub caption_length: u32,
    pub has_call_to_action: bool,
    pub media_type: MediaType,
}

impl PostMetrics {
    /// Rejects values the type system lets through but the scoring model
    /// has no meaning for.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if !self.engagement_rate.is_finite() || self.engagement_rate < 0.0 {
            return Err(MetricsError::InvalidEngagementRate(self.engagement_rate));
        }
        if self.content_quality_score > MAX_CONTENT_QUALITY {
            return Err(MetricsError::InvalidQualityScore(self.content_quality_score));
        }
        if let Some(rate) = self.video_completion_rate {
            if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
                return Err(MetricsError::InvalidVideoCompletion(rate));
            }
        }
        Ok(())
    }
}

impl Default for PostMetrics {
    fn default() -> Self {
        Self {
            saves: 0,
            shares: 0,
            engagement_rate: 0.0,
            hashtag_count: 0,
            is_optimal_time: false,
            content_quality_score: 0,
            video_completion_rate: None,
            caption_length: 0,
            has_call_to_action: false,
            media_type: MediaType::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub level: LevelSummary,
    pub suggestions: Vec<Suggestion>,
    pub breakdown: ScoreBreakdown,
}

pub fn evaluate(metrics: &PostMetrics) -> ScoreResult {
    evaluate_with_config(metrics, &ScoringConfig::default())
}

pub fn evaluate_with_config(metrics: &PostMetrics, config: &ScoringConfig) -> ScoreResult {
    let scorer = AlgorithmScorer::new(config.weights.clone());
    let rules = SuggestionRules::new(config.suggestions.clone());

    let breakdown = scorer.breakdown(metrics);
    let score = breakdown.score();

    ScoreResult {
        score,
        level: get_score_level(score).summary(),
        suggestions: rules.evaluate(metrics),
        breakdown,
    }
}

pub fn evaluate_checked(
    metrics: &PostMetrics,
    config: &ScoringConfig,
) -> Result<ScoreResult, MetricsError> {
    metrics.validate()?;
    Ok(evaluate_with_config(metrics, config))
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
