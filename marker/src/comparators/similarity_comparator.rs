//! Edit-distance similarity between two normalized strings.
//!
//! Similarity is an integer percentage: `round((max_len - distance) / max_len * 100)`,
//! where `distance` is the Levenshtein distance computed over characters.

use crate::utilities::normalization::normalize;

/// Classic Levenshtein distance with unit insert/delete/substitute costs.
///
/// Uses the full `(m + 1) x (n + 1)` table.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        table[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[m][n]
}

/// Percentage similarity in `0..=100`. Two empty strings are identical.
///
/// ```
/// use marker::comparators::similarity_comparator::similarity;
///
/// assert_eq!(similarity("kitten", "sitting"), 57);
/// assert_eq!(similarity("", ""), 100);
/// ```
pub fn similarity(a: &str, b: &str) -> u32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let distance = levenshtein_distance(a, b);
    let ratio = (max_len - distance) as f64 / max_len as f64;
    (ratio * 100.0).round() as u32
}

/// Normalizes both texts, then scores them with [`similarity`].
///
/// Output mode ignores case, the fixed punctuation set and spacing; source mode
/// ignores whitespace only.
pub fn text_similarity(a: &str, b: &str, is_source_code: bool) -> u32 {
    similarity(
        &normalize(a, is_source_code),
        &normalize(b, is_source_code),
    )
}
