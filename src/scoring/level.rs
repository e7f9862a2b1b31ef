use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLevel {
    Excellent,
    Good,
    Average,
    Poor,
    VeryPoor,
}

impl ScoreLevel {
    pub const ALL: [ScoreLevel; 5] = [
        ScoreLevel::Excellent,
        ScoreLevel::Good,
        ScoreLevel::Average,
        ScoreLevel::Poor,
        ScoreLevel::VeryPoor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "Excellent",
            ScoreLevel::Good => "Good",
            ScoreLevel::Average => "Average",
            ScoreLevel::Poor => "Poor",
            ScoreLevel::VeryPoor => "Very Poor",
        }
    }

    pub fn color_token(self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "green",
            ScoreLevel::Good => "blue",
            ScoreLevel::Average => "yellow",
            ScoreLevel::Poor => "orange",
            ScoreLevel::VeryPoor => "red",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScoreLevel::Excellent => "Strong save and share signals; likely to be pushed to new audiences.",
            ScoreLevel::Good => "Solid performance with room to grow reach.",
            ScoreLevel::Average => "Typical performance; a few changes could lift distribution.",
            ScoreLevel::Poor => "Weak engagement signals; distribution will be limited.",
            ScoreLevel::VeryPoor => "Little algorithmic traction; rework the content and timing.",
        }
    }

    /// Inclusive lower bound of the band.
    pub fn min_score(self) -> u8 {
        match self {
            ScoreLevel::Excellent => 80,
            ScoreLevel::Good => 60,
            ScoreLevel::Average => 40,
            ScoreLevel::Poor => 20,
            ScoreLevel::VeryPoor => 0,
        }
    }

    pub fn summary(self) -> LevelSummary {
        LevelSummary {
            name: self.label().to_string(),
            color_token: self.color_token().to_string(),
            description: self.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub name: String,
    pub color_token: String,
    pub description: String,
}

pub fn get_score_level(score: u8) -> ScoreLevel {
    ScoreLevel::ALL
        .into_iter()
        .find(|level| score >= level.min_score())
        .unwrap_or(ScoreLevel::VeryPoor)
}
