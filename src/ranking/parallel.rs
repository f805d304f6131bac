//! Rayon versions of the ranking scans.
//!
//! Results are identical to the sequential scans: the best-of reduction
//! prefers the higher score and, on equal scores, the lower index, and
//! `collect` keeps candidate order.

use rayon::prelude::*;
use std::time::Instant;

use crate::core::Match;
use crate::scoring::{QueryScorer, Scorer};

/// Parallel `extract_one_with`
pub fn par_extract_one_with<S: AsRef<str> + Sync>(
    query: &str,
    choices: &[S],
    score_cutoff: f64,
    scorer: &dyn Scorer,
) -> Option<Match> {
    let prepared = scorer.prepare(query);
    par_best_of(&*prepared, choices, score_cutoff)
}

/// Parallel `extract_with`
pub fn par_extract_with<S: AsRef<str> + Sync>(
    query: &str,
    choices: &[S],
    score_cutoff: f64,
    scorer: &dyn Scorer,
) -> Vec<Match> {
    let prepared = scorer.prepare(query);
    par_filter_all(&*prepared, choices, score_cutoff)
}

#[inline]
fn prefer(current: (usize, f64), other: (usize, f64)) -> (usize, f64) {
    let (index, score) = current;
    let (other_index, other_score) = other;
    if other_score > score || (other_score == score && other_index < index) {
        other
    } else {
        current
    }
}

pub(crate) fn par_best_of<Q, S>(scorer: &Q, choices: &[S], score_cutoff: f64) -> Option<Match>
where
    Q: QueryScorer + ?Sized,
    S: AsRef<str> + Sync,
{
    let start = Instant::now();

    let best = choices
        .par_iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            scorer
                .similarity_with_cutoff(choice.as_ref(), score_cutoff)
                .map(|score| (index, score))
        })
        .reduce_with(prefer);

    tracing::debug!(
        candidates = choices.len(),
        found = best.is_some(),
        threads = rayon::current_num_threads(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "parallel extract_one finished"
    );

    best.map(|(index, score)| Match::new(index, choices[index].as_ref(), score))
}

pub(crate) fn par_filter_all<Q, S>(scorer: &Q, choices: &[S], score_cutoff: f64) -> Vec<Match>
where
    Q: QueryScorer + ?Sized,
    S: AsRef<str> + Sync,
{
    let start = Instant::now();

    let matches: Vec<Match> = choices
        .par_iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            let choice = choice.as_ref();
            scorer
                .similarity_with_cutoff(choice, score_cutoff)
                .map(|score| Match::new(index, choice, score))
        })
        .collect();

    tracing::debug!(
        candidates = choices.len(),
        kept = matches.len(),
        threads = rayon::current_num_threads(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "parallel extract finished"
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::process::{extract_one_with, extract_with};
    use crate::scoring::{Ratio, ScorerKind};

    fn records(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("Record Entry {}", i % 37))
            .collect()
    }

    #[test]
    fn test_prefer_keeps_lower_index_on_tie() {
        assert_eq!(prefer((4, 50.0), (2, 50.0)), (2, 50.0));
        assert_eq!(prefer((2, 50.0), (4, 50.0)), (2, 50.0));
        assert_eq!(prefer((2, 50.0), (4, 60.0)), (4, 60.0));
    }

    #[test]
    fn test_par_extract_one_matches_sequential() {
        // Many exact duplicates: the tie must go to the first occurrence
        let choices = records(2_000);
        for kind in ScorerKind::ALL {
            let scorer = kind.scorer();
            let seq = extract_one_with("record entry 12", &choices, 0.0, scorer);
            let par = par_extract_one_with("record entry 12", &choices, 0.0, scorer);
            assert_eq!(seq, par, "{}", kind);
        }

        let par = par_extract_one_with("Record Entry 12", &choices, 0.0, &Ratio).unwrap();
        assert_eq!(par.index, 12);
        assert_eq!(par.score, 100.0);
    }

    #[test]
    fn test_par_extract_keeps_order() {
        let choices = records(1_000);
        let seq = extract_with("Record Entry 3", &choices, 60.0, &Ratio);
        let par = par_extract_with("Record Entry 3", &choices, 60.0, &Ratio);
        assert_eq!(seq, par);
        assert!(par.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn test_par_empty() {
        let choices: Vec<&str> = Vec::new();
        assert!(par_extract_one_with("abc", &choices, 0.0, &Ratio).is_none());
        assert!(par_extract_with("abc", &choices, 0.0, &Ratio).is_empty());
    }
}
