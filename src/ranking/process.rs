use std::time::Instant;

use crate::core::Match;
use crate::scoring::{CachedRatio, QueryScorer, Scorer};

/// Best match by indel ratio, or `None` when `choices` is empty or nothing
/// reaches `score_cutoff`.
///
/// A later choice replaces the running best only with a strictly greater
/// score, so the lowest index wins ties.
pub fn extract_one<S: AsRef<str>>(query: &str, choices: &[S], score_cutoff: f64) -> Option<Match> {
    let scorer = CachedRatio::new(query);
    best_of(&scorer, choices, score_cutoff)
}

/// `extract_one` with any scorer
pub fn extract_one_with<S: AsRef<str>>(
    query: &str,
    choices: &[S],
    score_cutoff: f64,
    scorer: &dyn Scorer,
) -> Option<Match> {
    let prepared = scorer.prepare(query);
    best_of(&*prepared, choices, score_cutoff)
}

/// Every choice scoring at least `score_cutoff`, in original order.
///
/// The result is not sorted by score; use [`sort_by_score`] or [`rank`].
pub fn extract<S: AsRef<str>>(query: &str, choices: &[S], score_cutoff: f64) -> Vec<Match> {
    let scorer = CachedRatio::new(query);
    filter_all(&scorer, choices, score_cutoff)
}

/// `extract` with any scorer
pub fn extract_with<S: AsRef<str>>(
    query: &str,
    choices: &[S],
    score_cutoff: f64,
    scorer: &dyn Scorer,
) -> Vec<Match> {
    let prepared = scorer.prepare(query);
    filter_all(&*prepared, choices, score_cutoff)
}

/// Stable sort, highest score first. Equal scores keep their relative order.
pub fn sort_by_score(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}

/// `extract`, sorted by score and truncated to `limit`
pub fn rank<S: AsRef<str>>(
    query: &str,
    choices: &[S],
    score_cutoff: f64,
    limit: Option<usize>,
) -> Vec<Match> {
    let mut matches = extract(query, choices, score_cutoff);
    sort_and_truncate(&mut matches, limit);
    matches
}

pub(crate) fn sort_and_truncate(matches: &mut Vec<Match>, limit: Option<usize>) {
    sort_by_score(matches);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
}

pub(crate) fn best_of<Q, S>(scorer: &Q, choices: &[S], score_cutoff: f64) -> Option<Match>
where
    Q: QueryScorer + ?Sized,
    S: AsRef<str>,
{
    let start = Instant::now();
    let mut best: Option<(usize, f64)> = None;

    for (index, choice) in choices.iter().enumerate() {
        // Anything below the current best can never replace it
        let threshold = best.map_or(score_cutoff, |(_, score)| score.max(score_cutoff));

        let Some(score) = scorer.similarity_with_cutoff(choice.as_ref(), threshold) else {
            continue;
        };

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    tracing::debug!(
        candidates = choices.len(),
        found = best.is_some(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "extract_one finished"
    );

    best.map(|(index, score)| Match::new(index, choices[index].as_ref(), score))
}

pub(crate) fn filter_all<Q, S>(scorer: &Q, choices: &[S], score_cutoff: f64) -> Vec<Match>
where
    Q: QueryScorer + ?Sized,
    S: AsRef<str>,
{
    let start = Instant::now();

    let matches: Vec<Match> = choices
        .iter()
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
        elapsed_us = start.elapsed().as_micros() as u64,
        "extract finished"
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ScorerKind, TokenSortRatio};

    #[test]
    fn test_extract_one_empty_choices() {
        let choices: [&str; 0] = [];
        assert!(extract_one("abc", &choices, 0.0).is_none());
    }

    #[test]
    fn test_extract_one_exact() {
        let best = extract_one("abc", &["abc", "ab"], 0.0).unwrap();
        assert_eq!(best.text, "abc");
        assert_eq!(best.score, 100.0);
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_extract_one_first_seen_wins_ties() {
        // Both score 50.0
        let best = extract_one("ab", &["ac", "ad"], 0.0).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.text, "ac");

        let best = extract_one("ab", &["zz", "ac", "ab", "ab"], 0.0).unwrap();
        assert_eq!(best.index, 2);
    }

    #[test]
    fn test_extract_one_cutoff_excludes_but_keeps_scanning() {
        let best = extract_one("abc", &["xyz", "abd", "abc"], 90.0).unwrap();
        assert_eq!(best.index, 2);

        assert!(extract_one("abc", &["xyz", "abd"], 90.0).is_none());
    }

    #[test]
    fn test_extract_one_zero_scores_still_found() {
        // Nothing overlaps, but with no cutoff the first choice is the best
        let best = extract_one("abc", &["xyz", "uvw"], 0.0).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_extract_filters_and_keeps_order() {
        let matches = extract("abc", &["abc", "xyz", "ab"], 50.0);
        assert_eq!(
            matches,
            vec![Match::new(0, "abc", 100.0), Match::new(2, "ab", 80.0)]
        );
    }

    #[test]
    fn test_extract_does_not_sort() {
        let matches = extract("abc", &["ab", "abc"], 0.0);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[1].index, 1);
        assert!(matches[0].score < matches[1].score);
    }

    #[test]
    fn test_extract_empty() {
        let choices: Vec<String> = Vec::new();
        assert!(extract("abc", &choices, 0.0).is_empty());
    }

    #[test]
    fn test_sort_by_score_is_stable() {
        let mut matches = vec![
            Match::new(0, "a", 50.0),
            Match::new(1, "b", 80.0),
            Match::new(2, "c", 50.0),
            Match::new(3, "d", 80.0),
        ];
        sort_by_score(&mut matches);
        let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_rank_with_limit() {
        let ranked = rank("abc", &["ab", "xyz", "abc", "abx"], 0.0, Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].text, "abc");
        assert_eq!(ranked[1].text, "ab");
    }

    #[test]
    fn test_extract_with_token_sort() {
        let choices = ["mets new york", "boston red sox"];
        let best = extract_one_with("new york mets", &choices, 0.0, &TokenSortRatio).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 100.0);

        let matches = extract_with("new york mets", &choices, 90.0, ScorerKind::TokenSortRatio.scorer());
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let choices = vec!["hello".to_string(), "help".to_string()];
        let best = extract_one("hello", &choices, 0.0).unwrap();
        assert_eq!(best.text, "hello");
    }
}
