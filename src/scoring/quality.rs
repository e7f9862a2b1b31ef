use crate::scoring::{IDEAL_CAPTION_CHARS, IDEAL_HASHTAGS};
use crate::MediaType;

pub const MAX_CONTENT_QUALITY: u8 = 5;

/// Composite 0-5 heuristic over caption length, hashtags, media and CTA.
pub fn calculate_content_quality_score(
    caption_length: u32,
    hashtag_count: u32,
    media_type: MediaType,
    has_call_to_action: bool,
) -> u8 {
    let mut score = 0u8;

    if IDEAL_CAPTION_CHARS.contains(&caption_length) {
        score += 2;
    } else if caption_length > 0 {
        score += 1;
    }

    if IDEAL_HASHTAGS.contains(&hashtag_count) {
        score += 2;
    } else if hashtag_count > 0 {
        score += 1;
    }

    if media_type.is_rich() {
        score += 1;
    }
    if has_call_to_action {
        score += 1;
    }

    score.min(MAX_CONTENT_QUALITY)
}
