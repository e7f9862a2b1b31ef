use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scoring::{PostingWindows, ScoreWeights, SuggestionThresholds};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/history.json"),
            capacity: 50,
        }
    }
}

/// Optional route groups mounted by the HTTP service. Health and scoring are
/// always mounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSet {
    pub quality: bool,
    pub timing: bool,
    pub insights: bool,
    pub history: bool,
}

impl Default for RouteSet {
    fn default() -> Self {
        Self {
            quality: true,
            timing: true,
            insights: true,
            history: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub suggestions: SuggestionThresholds,
    pub timing: PostingWindows,
    pub history: HistoryConfig,
    pub routes: RouteSet,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let parsed: ScoringConfig =
                    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(path = %path.display(), "loaded scoring config");
                parsed
            }
            _ => ScoringConfig::default(),
        };

        config.apply_env_overrides();
        config.timing.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(offset) = env::var("SCORING_UTC_OFFSET_MINUTES") {
            match offset.trim().parse::<i32>() {
                Ok(value) => self.timing.utc_offset_minutes = value,
                Err(_) => tracing::warn!(value = %offset, "ignoring invalid SCORING_UTC_OFFSET_MINUTES"),
            }
        }
        if let Ok(path) = env::var("SCORING_HISTORY_PATH") {
            if !path.trim().is_empty() {
                self.history.path = PathBuf::from(path);
            }
        }
        if let Ok(capacity) = env::var("SCORING_HISTORY_CAPACITY") {
            if let Ok(value) = capacity.trim().parse::<usize>() {
                self.history.capacity = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("SCORING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/scoring.toml")))
}
