//! # fuzzrank
//!
//! Fuzzy string scoring and candidate ranking:
//! - Normalized indel similarity (0-100), plus partial and token scorers
//! - `extract_one`: best candidate above a cutoff, first seen wins ties
//! - `extract`: every candidate above a cutoff, in original order
//! - Rayon-parallel scans with results identical to the sequential ones
//! - Configurable `Extractor` front-end and a `fuzzrank` CLI (feature `cli`)
//!
//! ## Example Usage
//!
//! ```rust
//! use fuzzrank::{extract, extract_one, score, sort_by_score};
//!
//! assert_eq!(score("abc", "ab"), 80.0);
//!
//! let best = extract_one("abc", &["abc", "ab"], 0.0).unwrap();
//! assert_eq!((best.text.as_str(), best.score), ("abc", 100.0));
//!
//! let mut matches = extract("abc", &["ab", "xyz", "abc"], 50.0);
//! assert_eq!(matches.len(), 2);
//! sort_by_score(&mut matches);
//! assert_eq!(matches[0].text, "abc");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod ranking;
pub mod scoring;

// Re-export primary types
pub use config::MatchConfig;
pub use crate::core::Match;
pub use error::{FuzzError, Result};
pub use extractor::Extractor;
pub use ranking::{
    extract, extract_one, extract_one_with, extract_with, par_extract_one_with, par_extract_with,
    rank, sort_by_score,
};
pub use scoring::{CachedRatio, Processor, QueryScorer, Scorer, ScorerKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Normalized indel similarity between `a` and `b` (0.0 - 100.0).
///
/// Characters are compared by exact codepoint; two empty strings score 100.
pub fn score(a: &str, b: &str) -> f64 {
    scoring::ratio(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_score_edge_cases() {
        assert_eq!(score("", ""), 100.0);
        assert_eq!(score("", "abc"), 0.0);
        assert_eq!(score("abc", ""), 0.0);
    }
}
