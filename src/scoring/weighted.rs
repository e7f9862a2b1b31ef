use serde::{Deserialize, Serialize};

use crate::scoring::IDEAL_CAPTION_CHARS;
use crate::{MediaType, PostMetrics};

/// A linear contribution `value * weight`, capped at `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub weight: f64,
    pub cap: f64,
}

impl Factor {
    pub const fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }

    pub fn apply(self, value: f64) -> f64 {
        (value * self.weight).min(self.cap).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Hashtags beyond this count earn nothing extra.
    pub hashtag_limit: u32,
    pub optimal_time_bonus: f64,
    pub caption_ideal_bonus: f64,
    pub caption_present_bonus: f64,
    pub call_to_action_bonus: f64,
    pub rich_media_bonus: f64,
    pub saves: Factor,
    pub shares: Factor,
    pub engagement_rate: Factor,
    pub hashtags: Factor,
    pub content_quality: Factor,
    pub video_completion: Factor,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hashtag_limit: 15,
            optimal_time_bonus: 2.0,
            caption_ideal_bonus: 3.0,
            caption_present_bonus: 1.0,
            call_to_action_bonus: 2.0,
            rich_media_bonus: 1.0,
            saves: Factor::new(10.0, 40.0),
            shares: Factor::new(8.0, 32.0),
            engagement_rate: Factor::new(0.3, 15.0),
            hashtags: Factor::new(0.4, 6.0),
            content_quality: Factor::new(3.0, 15.0),
            video_completion: Factor::new(0.1, 10.0),
        }
    }
}

/// Per-factor contributions behind a score, already capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub saves: f64,
    pub shares: f64,
    pub engagement_rate: f64,
    pub hashtags: f64,
    pub timing: f64,
    pub content_quality: f64,
    pub video_completion: f64,
    pub caption: f64,
    pub call_to_action: f64,
    pub media_type: f64,
    pub raw_total: f64,
}

impl ScoreBreakdown {
    pub fn score(&self) -> u8 {
        finalize_score(self.raw_total)
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmScorer {
    weights: ScoreWeights,
}

impl AlgorithmScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn breakdown(&self, metrics: &PostMetrics) -> ScoreBreakdown {
        let weights = &self.weights;

        let saves = weights.saves.apply(metrics.saves as f64);
        let shares = weights.shares.apply(metrics.shares as f64);
        let engagement_rate = weights.engagement_rate.apply(metrics.engagement_rate);
        let hashtags = weights
            .hashtags
            .apply(metrics.hashtag_count.min(weights.hashtag_limit) as f64);
        let timing = bonus(metrics.is_optimal_time, weights.optimal_time_bonus);
        let content_quality = weights
            .content_quality
            .apply(metrics.content_quality_score as f64);

        // Only video posts report completion.
        let video_completion = match (metrics.media_type, metrics.video_completion_rate) {
            (MediaType::Video, Some(rate)) => weights.video_completion.apply(rate),
            _ => 0.0,
        };

        let caption = if IDEAL_CAPTION_CHARS.contains(&metrics.caption_length) {
            weights.caption_ideal_bonus
        } else if metrics.caption_length > 0 {
            weights.caption_present_bonus
        } else {
            0.0
        };

        let call_to_action = bonus(metrics.has_call_to_action, weights.call_to_action_bonus);
        let media_type = bonus(metrics.media_type.is_rich(), weights.rich_media_bonus);

        let raw_total = saves
            + shares
            + engagement_rate
            + hashtags
            + timing
            + content_quality
            + video_completion
            + caption
            + call_to_action
            + media_type;

        ScoreBreakdown {
            saves,
            shares,
            engagement_rate,
            hashtags,
            timing,
            content_quality,
            video_completion,
            caption,
            call_to_action,
            media_type,
            raw_total,
        }
    }

    pub fn score(&self, metrics: &PostMetrics) -> u8 {
        self.breakdown(metrics).score()
    }
}

impl Default for AlgorithmScorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

/// Estimated algorithmic favourability of a post, 0-100.
pub fn calculate_algorithm_score(metrics: &PostMetrics) -> u8 {
    AlgorithmScorer::default().score(metrics)
}

/// Rounds to the nearest integer and clamps into 0..=100.
pub fn finalize_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn bonus(condition: bool, value: f64) -> f64 {
    if condition {
        value
    } else {
        0.0
    }
}
