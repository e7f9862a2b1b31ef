pub mod level;
pub mod quality;
pub mod suggestions;
pub mod timing;
pub mod weighted;

use std::ops::RangeInclusive;

pub use level::{get_score_level, LevelSummary, ScoreLevel};
pub use quality::{calculate_content_quality_score, MAX_CONTENT_QUALITY};
pub use suggestions::{
    generate_improvement_suggestions, Priority, Suggestion, SuggestionRules, SuggestionThresholds,
};
pub use timing::{is_optimal_posting_time, PostingWindow, PostingWindows};
pub use weighted::{
    calculate_algorithm_score, finalize_score, AlgorithmScorer, Factor, ScoreBreakdown,
    ScoreWeights,
};

/// Caption lengths, in characters, that earn the full caption bonus.
pub const IDEAL_CAPTION_CHARS: RangeInclusive<u32> = 100..=500;

/// Hashtag counts that earn the full quality bonus.
pub const IDEAL_HASHTAGS: RangeInclusive<u32> = 5..=15;
