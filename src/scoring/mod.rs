pub mod fuzz;
pub mod indel;
pub mod processor;
pub mod token;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FuzzError;

pub use fuzz::{partial_ratio, ratio, CachedRatio, PartialRatio, Ratio};
pub use processor::{default_process, Processor};
pub use token::{token_set_ratio, token_sort_ratio, TokenSetRatio, TokenSortRatio};

/// Trait for similarity metrics (0.0 - 100.0, 100 = identical)
pub trait Scorer: Send + Sync {
    /// Score a pair of strings
    fn score(&self, a: &str, b: &str) -> f64;

    /// Bind the metric to one query, caching whatever can be reused across
    /// choices
    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn QueryScorer + 'a>;

    /// Get scorer name for logging
    fn name(&self) -> &str;
}

/// A metric bound to a fixed query
pub trait QueryScorer: Send + Sync {
    fn similarity(&self, choice: &str) -> f64;

    /// `None` when the choice scores below `score_cutoff`
    fn similarity_with_cutoff(&self, choice: &str, score_cutoff: f64) -> Option<f64> {
        let score = self.similarity(choice);
        (score >= score_cutoff).then_some(score)
    }
}

/// Query binding for scorers with nothing worth caching
pub(crate) struct Prepared<'a, S> {
    scorer: &'a S,
    query: &'a str,
}

impl<'a, S: Scorer> Prepared<'a, S> {
    pub(crate) fn new(scorer: &'a S, query: &'a str) -> Self {
        Self { scorer, query }
    }
}

impl<S: Scorer> QueryScorer for Prepared<'_, S> {
    fn similarity(&self, choice: &str) -> f64 {
        self.scorer.score(self.query, choice)
    }
}

/// Scorer selection for configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Ratio,
    PartialRatio,
    TokenSortRatio,
    TokenSetRatio,
}

impl ScorerKind {
    pub const ALL: [ScorerKind; 4] = [
        ScorerKind::Ratio,
        ScorerKind::PartialRatio,
        ScorerKind::TokenSortRatio,
        ScorerKind::TokenSetRatio,
    ];

    pub fn scorer(self) -> &'static dyn Scorer {
        match self {
            ScorerKind::Ratio => &Ratio,
            ScorerKind::PartialRatio => &PartialRatio,
            ScorerKind::TokenSortRatio => &TokenSortRatio,
            ScorerKind::TokenSetRatio => &TokenSetRatio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerKind::Ratio => "ratio",
            ScorerKind::PartialRatio => "partial_ratio",
            ScorerKind::TokenSortRatio => "token_sort_ratio",
            ScorerKind::TokenSetRatio => "token_set_ratio",
        }
    }
}

impl FromStr for ScorerKind {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ScorerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| FuzzError::UnknownScorer(s.to_string()))
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
