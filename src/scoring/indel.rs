//! Indel distance: edit distance with insertions and deletions only.
//!
//! A substitution is one deletion plus one insertion, so it costs 2.

/// Indel distance between two strings, counted in Unicode scalar values.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance_chars(&a, &b)
}

/// Distance divided by the combined length (0.0 - 1.0)
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let lensum = a.len() + b.len();

    if lensum == 0 {
        0.0
    } else {
        distance_chars(&a, &b) as f64 / lensum as f64
    }
}

/// `1 - normalized_distance` (0.0 - 1.0)
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    1.0 - normalized_distance(a, b)
}

/// Indel distance over pre-decoded character slices.
pub(crate) fn distance_chars(a: &[char], b: &[char]) -> usize {
    let (a, b) = strip_common_affix(a, b);

    // Shorter sequence spans the DP row
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();
    let mut curr_row = vec![0; short.len() + 1];

    for (i, cl) in long.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, cs) in short.iter().enumerate() {
            let cost = if cl == cs { 0 } else { 2 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[short.len()]
}

/// Convert a distance into a 0-100 similarity for strings of combined
/// length `lensum`. Two empty strings are identical.
#[inline]
pub(crate) fn similarity_pct(distance: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    let kept = lensum.saturating_sub(distance);
    kept as f64 * 100.0 / lensum as f64
}

#[inline]
fn strip_common_affix<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}
