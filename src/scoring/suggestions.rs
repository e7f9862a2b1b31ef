use serde::{Deserialize, Serialize};

use crate::PostMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: Priority,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionThresholds {
    pub min_saves: u32,
    pub min_shares: u32,
    pub min_engagement_rate: f64,
    pub min_hashtags: u32,
    pub max_hashtags: u32,
    pub min_content_quality: u8,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            min_saves: 2,
            min_shares: 1,
            min_engagement_rate: 3.0,
            min_hashtags: 5,
            max_hashtags: 20,
            min_content_quality: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionRules {
    thresholds: SuggestionThresholds,
}

impl SuggestionRules {
    pub fn new(thresholds: SuggestionThresholds) -> Self {
        Self { thresholds }
    }

    /// Every rule is checked on its own; output keeps rule order.
    pub fn evaluate(&self, metrics: &PostMetrics) -> Vec<Suggestion> {
        let limits = &self.thresholds;
        let mut suggestions = Vec::new();

        if metrics.saves < limits.min_saves {
            suggestions.push(suggestion(
                Priority::High,
                "Low save rate",
                "Create practical, reference-worthy content such as how-to guides, checklists or tips people want to come back to.",
            ));
        }
        if metrics.shares < limits.min_shares {
            suggestions.push(suggestion(
                Priority::High,
                "Low share rate",
                "Post relatable, emotional or surprising content people want to send to a friend, and ask them to share it.",
            ));
        }
        if metrics.engagement_rate < limits.min_engagement_rate {
            suggestions.push(suggestion(
                Priority::High,
                "Low engagement rate",
                "Ask a question, run a poll or invite opinions in the caption to start a conversation in the comments.",
            ));
        }
        if metrics.hashtag_count < limits.min_hashtags {
            suggestions.push(suggestion(
                Priority::Medium,
                "Too few hashtags",
                "Use 5-15 relevant hashtags, mixing broad and niche tags, so the post is discoverable beyond your followers.",
            ));
        }
        if metrics.hashtag_count > limits.max_hashtags {
            suggestions.push(suggestion(
                Priority::Medium,
                "Too many hashtags",
                "Trim to the 5-15 most relevant hashtags; long tag lists look spammy and dilute reach.",
            ));
        }
        if !metrics.is_optimal_time {
            suggestions.push(suggestion(
                Priority::Medium,
                "Posted outside peak hours",
                "Schedule posts for 9-11am or 7-9pm, when your audience is most active.",
            ));
        }
        if metrics.content_quality_score < limits.min_content_quality {
            suggestions.push(suggestion(
                Priority::Medium,
                "Content quality could be higher",
                "Write a 100-500 character caption, use video or a carousel and keep visuals sharp and on-brand.",
            ));
        }
        if !metrics.has_call_to_action {
            suggestions.push(suggestion(
                Priority::Low,
                "No call-to-action",
                "Tell viewers what to do next, e.g. \"save this for later\", \"share with a friend\" or \"comment below\".",
            ));
        }

        suggestions
    }
}

pub fn generate_improvement_suggestions(metrics: &PostMetrics) -> Vec<Suggestion> {
    SuggestionRules::default().evaluate(metrics)
}

fn suggestion(priority: Priority, message: &str, detail: &str) -> Suggestion {
    Suggestion {
        priority,
        message: message.to_string(),
        suggestion: detail.to_string(),
    }
}
