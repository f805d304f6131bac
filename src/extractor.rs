use std::borrow::Cow;

use crate::config::MatchConfig;
use crate::core::Match;
use crate::error::Result;
use crate::ranking::parallel::{par_best_of, par_filter_all};
use crate::ranking::process::{best_of, filter_all, sort_and_truncate};
use crate::scoring::{Processor, Scorer};

/// Configured matching front-end: scorer, cutoff, preprocessing, limit and
/// parallelism policy in one place.
pub struct Extractor {
    config: MatchConfig,
    scorer: &'static dyn Scorer,
}

impl Extractor {
    /// Create a new extractor after validating `config`
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;

        let scorer = config.scorer.scorer();
        tracing::debug!(
            scorer = scorer.name(),
            score_cutoff = config.score_cutoff,
            processor = %config.processor,
            parallel = config.parallel,
            "extractor initialized"
        );

        Ok(Self { config, scorer })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Get scorer name for logging
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Score one pair with the configured processor and scorer
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let processor = self.config.processor;
        self.scorer.score(&processor.apply(a), &processor.apply(b))
    }

    /// Best choice at or above the configured cutoff
    pub fn extract_one<S: AsRef<str> + Sync>(&self, query: &str, choices: &[S]) -> Option<Match> {
        let processed = self.process_choices(choices);
        let query = self.config.processor.apply(query);
        let prepared = self.scorer.prepare(&query);
        let cutoff = self.config.score_cutoff;

        let best = if self.use_parallel(choices.len()) {
            par_best_of(&*prepared, &processed, cutoff)
        } else {
            best_of(&*prepared, &processed, cutoff)
        };

        best.map(|m| self.restore_text(m, choices))
    }

    /// Choices at or above the configured cutoff, in original order
    pub fn extract<S: AsRef<str> + Sync>(&self, query: &str, choices: &[S]) -> Vec<Match> {
        let processed = self.process_choices(choices);
        let query = self.config.processor.apply(query);
        let prepared = self.scorer.prepare(&query);
        let cutoff = self.config.score_cutoff;

        let matches = if self.use_parallel(choices.len()) {
            par_filter_all(&*prepared, &processed, cutoff)
        } else {
            filter_all(&*prepared, &processed, cutoff)
        };

        matches
            .into_iter()
            .map(|m| self.restore_text(m, choices))
            .collect()
    }

    /// `extract`, sorted by score (stable) and cut to the configured limit
    pub fn rank<S: AsRef<str> + Sync>(&self, query: &str, choices: &[S]) -> Vec<Match> {
        let mut matches = self.extract(query, choices);
        sort_and_truncate(&mut matches, self.config.limit);
        matches
    }

    fn use_parallel(&self, candidates: usize) -> bool {
        let parallel = self.config.parallel && candidates >= self.config.parallel_threshold;
        tracing::trace!(candidates, parallel, "ranking path selected");
        parallel
    }

    fn process_choices<'a, S: AsRef<str>>(&self, choices: &'a [S]) -> Vec<Cow<'a, str>> {
        choices
            .iter()
            .map(|choice| self.config.processor.apply(choice.as_ref()))
            .collect()
    }

    // Scores refer to processed text; callers get their own string back
    fn restore_text<S: AsRef<str>>(&self, mut m: Match, choices: &[S]) -> Match {
        if self.config.processor != Processor::None {
            m.text = choices[m.index].as_ref().to_string();
        }
        m
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            scorer: MatchConfig::default().scorer.scorer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzError;
    use crate::scoring::ScorerKind;

    #[test]
    fn test_extractor_creation() {
        let extractor = Extractor::new(MatchConfig::default()).unwrap();
        assert_eq!(extractor.scorer_name(), "ratio");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MatchConfig {
            score_cutoff: -5.0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            Extractor::new(config),
            Err(FuzzError::InvalidCutoff(_))
        ));
    }

    #[test]
    fn test_default_matches_free_functions() {
        let extractor = Extractor::default();
        let choices = ["abc", "xyz", "ab"];
        assert_eq!(
            extractor.extract("abc", &choices),
            crate::extract("abc", &choices, 0.0)
        );
        assert_eq!(
            extractor.extract_one("abc", &choices),
            crate::extract_one("abc", &choices, 0.0)
        );
    }

    #[test]
    fn test_processor_keeps_original_text() {
        let extractor = Extractor::new(MatchConfig {
            processor: Processor::Default,
            ..MatchConfig::default()
        })
        .unwrap();

        let choices = ["Mid-Year Report 2", "Annual Summary"];
        let best = extractor.extract_one("mid year report 2", &choices).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 100.0);
        assert_eq!(best.text, "Mid-Year Report 2");
    }

    #[test]
    fn test_rank_applies_cutoff_and_limit() {
        let extractor = Extractor::new(MatchConfig {
            score_cutoff: 50.0,
            limit: Some(2),
            ..MatchConfig::default()
        })
        .unwrap();

        let ranked = extractor.rank("abc", &["ab", "xyz", "abc", "abx", "a"]);
        let texts: Vec<&str> = ranked.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["abc", "ab"]);
    }

    #[test]
    fn test_parallel_path_agrees() {
        let choices: Vec<String> = (0..300).map(|i| format!("item {}", i % 17)).collect();
        let sequential = Extractor::new(MatchConfig {
            scorer: ScorerKind::TokenSortRatio,
            parallel: false,
            ..MatchConfig::default()
        })
        .unwrap();
        let parallel = Extractor::new(MatchConfig {
            scorer: ScorerKind::TokenSortRatio,
            parallel_threshold: 1,
            ..MatchConfig::default()
        })
        .unwrap();

        assert_eq!(
            sequential.extract_one("item 5", &choices),
            parallel.extract_one("item 5", &choices)
        );
        assert_eq!(
            sequential.extract("item 5", &choices),
            parallel.extract("item 5", &choices)
        );
    }

    #[test]
    fn test_score_uses_processor() {
        let plain = Extractor::default();
        assert_eq!(plain.score("ABC", "abc"), 0.0);

        let processed = Extractor::new(MatchConfig {
            processor: Processor::Default,
            ..MatchConfig::default()
        })
        .unwrap();
        assert_eq!(processed.score("ABC!", "abc"), 100.0);
    }
}
