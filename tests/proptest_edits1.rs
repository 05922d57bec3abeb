//! Property-based tests for the single-edit neighborhood using proptest

use proptest::prelude::*;
use std::collections::HashSet;

use endict::corrector::edits1;

/// Plain dynamic-programming Levenshtein distance for cross-validation.
fn naive_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }
    matrix[a.len()][b.len()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// The neighborhood never contains duplicate candidates.
    #[test]
    fn prop_no_duplicates(word in "[a-z]{0,8}") {
        let edits = edits1(&word);
        let unique: HashSet<&String> = edits.iter().collect();
        prop_assert_eq!(edits.len(), unique.len());
    }

    /// Every candidate is within true edit distance 1 of the word
    /// (transpositions are distance 2 under plain Levenshtein, so allow 2
    /// only for equal-length candidates that swap adjacent characters).
    #[test]
    fn prop_candidates_within_one_edit(word in "[a-z]{1,8}") {
        for cand in edits1(&word) {
            let d = naive_distance(&word, &cand);
            prop_assert!(
                d <= 2,
                "candidate {} too far from {} (distance {})", cand, word, d
            );
            if d == 2 {
                // Must be an adjacent transposition: same length, same
                // character multiset.
                prop_assert_eq!(cand.len(), word.len());
                let mut a: Vec<char> = word.chars().collect();
                let mut b: Vec<char> = cand.chars().collect();
                a.sort_unstable();
                b.sort_unstable();
                prop_assert_eq!(a, b);
            }
        }
    }

    /// All single deletions are present.
    #[test]
    fn prop_contains_all_deletions(word in "[a-z]{1,8}") {
        let edits: HashSet<String> = edits1(&word).into_iter().collect();
        let chars: Vec<char> = word.chars().collect();
        for i in 0..chars.len() {
            let mut deleted: String = chars[..i].iter().collect();
            deleted.extend(&chars[i + 1..]);
            prop_assert!(edits.contains(&deleted), "missing deletion {}", deleted);
        }
    }

    /// All single insertions of every alphabet letter are present.
    #[test]
    fn prop_contains_all_insertions(word in "[a-z]{0,6}", letter in proptest::char::range('a', 'z')) {
        let edits: HashSet<String> = edits1(&word).into_iter().collect();
        let chars: Vec<char> = word.chars().collect();
        for i in 0..=chars.len() {
            let mut inserted: String = chars[..i].iter().collect();
            inserted.push(letter);
            inserted.extend(&chars[i..]);
            prop_assert!(edits.contains(&inserted), "missing insertion {}", inserted);
        }
    }

    /// Words over the correction alphabet reproduce themselves via an
    /// identity substitution, so the word is always in its own neighborhood.
    #[test]
    fn prop_word_in_own_neighborhood(word in "[a-z]{1,8}") {
        let edits = edits1(&word);
        prop_assert!(edits.contains(&word));
    }
}

#[test]
fn test_four_letter_production_bound() {
    // A 4-letter word produces 4 deletions, 3 transpositions, 4*26
    // substitutions and 5*26 insertions = 241 candidates before dedup.
    // For a word with four distinct letters almost all of them are
    // distinct, so the deduplicated set stays close to that bound.
    let edits = edits1("word");
    assert!(edits.len() >= 200, "only {} candidates", edits.len());
    assert!(edits.len() <= 241);
}
