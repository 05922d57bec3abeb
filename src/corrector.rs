//! Single-edit spelling correction.
//!
//! Generates the full edit-distance-1 neighborhood of a query word:
//! every string reachable by one deletion, one adjacent transposition, one
//! substitution, or one insertion over the fixed 26-letter lowercase
//! alphabet. The generation is intentionally exhaustive rather than
//! heuristic — it runs only when a lookup misses, and covering the whole
//! neighborhood matters more than speed there. The resolver filters the
//! candidates through the store's existence check.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Candidate alphabet for substitutions and insertions.
const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Character buffer sized to keep typical dictionary words off the heap.
type CharBuf = SmallVec<[char; 24]>;

/// All single-edit variants of `word`, deduplicated.
///
/// Candidates keep their first-production order: deletions, then adjacent
/// transpositions, then substitutions, then insertions. Substituting a
/// letter with itself reproduces `word`, so the word itself appears in its
/// own neighborhood; callers only consult this set after `word` missed, so
/// the identity candidate never surfaces as a correction.
///
/// Cost is O(n · A) string constructions for a word of n characters over an
/// alphabet of A letters.
pub fn edits1(word: &str) -> Vec<String> {
    let chars: CharBuf = word.chars().collect();
    let n = chars.len();

    let mut seen = FxHashSet::default();
    let mut candidates = Vec::with_capacity(2 * n + 2 * 26 * (n + 1));
    let mut push = |cand: CharBuf, seen: &mut FxHashSet<String>, out: &mut Vec<String>| {
        let cand: String = cand.into_iter().collect();
        if seen.insert(cand.clone()) {
            out.push(cand);
        }
    };

    // Deletions
    for i in 0..n {
        let mut buf = chars.clone();
        buf.remove(i);
        push(buf, &mut seen, &mut candidates);
    }

    // Adjacent transpositions
    for i in 0..n.saturating_sub(1) {
        let mut buf = chars.clone();
        buf.swap(i, i + 1);
        push(buf, &mut seen, &mut candidates);
    }

    // Substitutions
    for i in 0..n {
        for &letter in ALPHABET {
            let mut buf = chars.clone();
            buf[i] = letter as char;
            push(buf, &mut seen, &mut candidates);
        }
    }

    // Insertions
    for i in 0..=n {
        for &letter in ALPHABET {
            let mut buf = chars.clone();
            buf.insert(i, letter as char);
            push(buf, &mut seen, &mut candidates);
        }
    }

    candidates
}
