//! Edit distance between tokens.

use std::cmp::min;

/// Damerau-Levenshtein distance (optimal string alignment variant).
///
/// Counts insertions, deletions, substitutions and transpositions of adjacent
/// characters. An adjacent swap therefore costs 1 instead of 2.
#[allow(clippy::needless_range_loop)]
pub fn damerau_levenshtein(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (len1, len2) = (a.len(), b.len());

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];
    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            matrix[i][j] = min(
                min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                matrix[i][j] = min(matrix[i][j], matrix[i - 2][j - 2] + 1);
            }
        }
    }

    matrix[len1][len2]
}

/// Smallest distance from `token` to any of `candidates`, or `None` when there are none.
pub fn nearest_distance<S: AsRef<str>>(token: &str, candidates: &[S]) -> Option<usize> {
    let token_len = token.chars().count();
    let mut best: Option<usize> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        // The length difference is a lower bound on the distance.
        if let Some(current) = best
            && token_len.abs_diff(candidate.chars().count()) >= current
        {
            continue;
        }

        let distance = damerau_levenshtein(token, candidate);
        best = Some(best.map_or(distance, |current| current.min(distance)));
        if distance == 0 {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damerau_levenshtein() {
        assert_eq!(damerau_levenshtein("", ""), 0);
        assert_eq!(damerau_levenshtein("", "abc"), 3);
        assert_eq!(damerau_levenshtein("abc", ""), 3);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein("search", "serach"), 1);
        assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
        assert_eq!(damerau_levenshtein("jumped", "jumpped"), 1);
    }

    #[test]
    fn test_common_typos() {
        let common_typos = vec![
            ("the", "teh"),
            ("world", "wrold"),
            ("quick", "quikc"),
            ("hello", "helo"),
        ];

        for (correct, typo) in common_typos {
            assert_eq!(
                damerau_levenshtein(correct, typo),
                1,
                "{} -> {}",
                correct,
                typo
            );
        }
    }

    #[test]
    fn test_nearest_distance() {
        let candidates = vec!["brown", "quick", "fox"];
        assert_eq!(nearest_distance("fox", &candidates), Some(0));
        assert_eq!(nearest_distance("qiuck", &candidates), Some(1));
        assert_eq!(nearest_distance("zzzzzzzzzz", &candidates), Some(10));

        let empty: Vec<String> = Vec::new();
        assert_eq!(nearest_distance("fox", &empty), None);
    }
}
