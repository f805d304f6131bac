//! Word-level scorers. Words are whitespace-separated; nothing else is
//! tokenized.

use std::collections::BTreeSet;

use crate::scoring::fuzz::{ratio, CachedRatio};
use crate::scoring::{Prepared, QueryScorer, Scorer};

#[inline]
fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[inline]
fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

/// `ratio` after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Ratio over the shared and differing word sets.
///
/// Builds the sorted intersection and the two sorted differences and keeps
/// the best `ratio` among intersection vs. intersection+diff pairs.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 100.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // One side's words are a subset of the other's
    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = sect.join(" ");
    let combined_ab = join_nonempty(&sect, &diff_ab.join(" "));
    let combined_ba = join_nonempty(&sect, &diff_ba.join(" "));

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

/// Token-sort scorer with the query's sorted form cached
struct CachedTokenSort {
    inner: CachedRatio,
}

impl QueryScorer for CachedTokenSort {
    fn similarity(&self, choice: &str) -> f64 {
        self.inner.similarity(&sorted_tokens(choice))
    }

    fn similarity_with_cutoff(&self, choice: &str, score_cutoff: f64) -> Option<f64> {
        self.inner
            .similarity_with_cutoff(&sorted_tokens(choice), score_cutoff)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

impl Scorer for TokenSortRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        token_sort_ratio(a, b)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn QueryScorer + 'a> {
        Box::new(CachedTokenSort {
            inner: CachedRatio::new(&sorted_tokens(query)),
        })
    }

    fn name(&self) -> &str {
        "token_sort_ratio"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl Scorer for TokenSetRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        token_set_ratio(a, b)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn QueryScorer + 'a> {
        Box::new(Prepared::new(self, query))
    }

    fn name(&self) -> &str {
        "token_set_ratio"
    }
}
