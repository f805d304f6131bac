use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{FuzzError, Result};
use crate::scoring::{Processor, ScorerKind};

/// Candidate count at which the extractor switches to rayon
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

const ENV_SCORER: &str = "FUZZRANK_SCORER";
const ENV_SCORE_CUTOFF: &str = "FUZZRANK_SCORE_CUTOFF";
const ENV_LIMIT: &str = "FUZZRANK_LIMIT";
const ENV_PROCESSOR: &str = "FUZZRANK_PROCESSOR";
const ENV_PARALLEL: &str = "FUZZRANK_PARALLEL";
const ENV_PARALLEL_THRESHOLD: &str = "FUZZRANK_PARALLEL_THRESHOLD";

/// Matching options for an [`Extractor`](crate::Extractor)
///
/// # Examples
///
/// ```
/// use fuzzrank::{MatchConfig, ScorerKind};
///
/// let config = MatchConfig::from_json(r#"{"scorer": "token_sort_ratio", "score_cutoff": 70}"#).unwrap();
/// assert_eq!(config.scorer, ScorerKind::TokenSortRatio);
/// assert_eq!(config.score_cutoff, 70.0);
/// assert!(config.parallel); // default
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Similarity metric
    pub scorer: ScorerKind,

    /// Inclusive lower bound on scores (0.0 - 100.0)
    pub score_cutoff: f64,

    /// Max matches returned by `rank`
    pub limit: Option<usize>,

    /// Preprocessing applied to query and choices
    pub processor: Processor,

    /// Allow the rayon path for large candidate lists
    pub parallel: bool,

    /// Min candidates before the rayon path is taken
    pub parallel_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Ratio,
            score_cutoff: 0.0,
            limit: None,
            processor: Processor::None,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Overlay `FUZZRANK_*` environment variables
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SCORER) {
            self.scorer = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SCORE_CUTOFF) {
            self.score_cutoff = parse_value(ENV_SCORE_CUTOFF, &value)?;
        }
        if let Some(value) = lookup(ENV_LIMIT) {
            self.limit = Some(parse_value(ENV_LIMIT, &value)?);
        }
        if let Some(value) = lookup(ENV_PROCESSOR) {
            self.processor = value.parse()?;
        }
        if let Some(value) = lookup(ENV_PARALLEL) {
            self.parallel = parse_flag(ENV_PARALLEL, &value)?;
        }
        if let Some(value) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_value(ENV_PARALLEL_THRESHOLD, &value)?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.score_cutoff) {
            return Err(FuzzError::InvalidCutoff(self.score_cutoff));
        }
        if self.limit == Some(0) {
            return Err(FuzzError::Config("limit must be at least 1".to_string()));
        }
        if self.parallel_threshold == 0 {
            return Err(FuzzError::Config(
                "parallel_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FuzzError::Config(format!("{}: cannot parse '{}'", key, value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FuzzError::Config(format!(
            "{}: expected a boolean, got '{}'",
            key, value
        ))),
    }
}
