use crate::scoring::indel::{distance_chars, similarity_pct};
use crate::scoring::{Prepared, QueryScorer, Scorer};

/// Normalized indel similarity (0.0 - 100.0).
///
/// `100 * (1 - distance / (len(a) + len(b)))`, and 100.0 for two empty
/// strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    similarity_pct(distance_chars(&a, &b), a.len() + b.len())
}

/// Best `ratio` between the shorter string and every same-length window of
/// the longer one.
///
/// Only windows lying fully inside the longer string are tried. Windows that
/// overhang either end are not, so scores can differ from rapidfuzz's
/// `partial_ratio` when the best alignment sits at an edge.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let lensum = short.len() * 2;
    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let score = similarity_pct(distance_chars(&short, window), lensum);
        if score > best {
            best = score;
            if best == 100.0 {
                break;
            }
        }
    }
    best
}

/// `ratio` with the query decoded once, for scoring many choices against it.
#[derive(Debug, Clone)]
pub struct CachedRatio {
    query: Vec<char>,
}

impl CachedRatio {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.chars().collect(),
        }
    }

    /// Same value as `ratio(query, choice)`
    pub fn similarity(&self, choice: &str) -> f64 {
        let choice: Vec<char> = choice.chars().collect();
        similarity_pct(
            distance_chars(&self.query, &choice),
            self.query.len() + choice.len(),
        )
    }

    /// `None` when the score is below `score_cutoff`.
    ///
    /// The length difference is a lower bound on the distance, so the DP is
    /// skipped when even that bound cannot reach the cutoff.
    pub fn similarity_with_cutoff(&self, choice: &str, score_cutoff: f64) -> Option<f64> {
        let choice: Vec<char> = choice.chars().collect();
        let lensum = self.query.len() + choice.len();
        let len_diff = self.query.len().abs_diff(choice.len());

        if similarity_pct(len_diff, lensum) < score_cutoff {
            return None;
        }

        let score = similarity_pct(distance_chars(&self.query, &choice), lensum);
        (score >= score_cutoff).then_some(score)
    }
}

impl QueryScorer for CachedRatio {
    fn similarity(&self, choice: &str) -> f64 {
        CachedRatio::similarity(self, choice)
    }

    fn similarity_with_cutoff(&self, choice: &str, score_cutoff: f64) -> Option<f64> {
        CachedRatio::similarity_with_cutoff(self, choice, score_cutoff)
    }
}

/// Plain indel ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct Ratio;

impl Scorer for Ratio {
    fn score(&self, a: &str, b: &str) -> f64 {
        ratio(a, b)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn QueryScorer + 'a> {
        Box::new(CachedRatio::new(query))
    }

    fn name(&self) -> &str {
        "ratio"
    }
}

/// Best-window indel ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Scorer for PartialRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        partial_ratio(a, b)
    }

    fn prepare<'a>(&'a self, query: &'a str) -> Box<dyn QueryScorer + 'a> {
        Box::new(Prepared::new(self, query))
    }

    fn name(&self) -> &str {
        "partial_ratio"
    }
}
