use serde::{Deserialize, Serialize};

const CTA_PHRASES: [&str; 14] = [
    "save this",
    "share this",
    "share with",
    "tag a friend",
    "tag someone",
    "comment below",
    "let me know",
    "link in bio",
    "follow for more",
    "double tap",
    "drop a",
    "tell me",
    "click the link",
    "dm me",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionFeatures {
    /// Unicode scalar values, not bytes.
    pub char_count: u32,
    pub hashtag_count: u32,
    pub has_call_to_action: bool,
    pub question_count: u32,
}

pub fn analyze_caption(text: &str) -> CaptionFeatures {
    let char_count = saturating_u32(text.chars().count());

    let hashtag_count = saturating_u32(
        text.split_whitespace()
            .filter(|word| word.starts_with('#') && word.chars().count() > 1)
            .count(),
    );

    let question_count = saturating_u32(text.chars().filter(|ch| *ch == '?').count());

    let lowercase = text.to_lowercase();
    let has_call_to_action = CTA_PHRASES.iter().any(|phrase| lowercase.contains(phrase));

    CaptionFeatures {
        char_count,
        hashtag_count,
        has_call_to_action,
        question_count,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
