//! Adjacent-pair frequency statistics over a token sequence.
//!
//! Pure computation: scanning a sequence has no side effects on it, and the
//! same sequence always produces the same statistics.

use std::collections::HashMap;

use crate::types::{Token, TokenFreq, TokenPair};

/// Frequencies of every adjacent token pair in one sequence, together with
/// the order in which distinct pairs were first encountered during the
/// left-to-right scan.
///
/// The encounter order makes tie-breaking reproducible: when several pairs
/// share the maximum count, the earliest-seen pair wins, never whichever
/// entry a hash map happens to iterate first.
#[derive(Debug, Default)]
pub(crate) struct PairStats {
    /// Occurrence count per distinct pair.
    counts: HashMap<TokenPair, TokenFreq>,
    /// Distinct pairs in first-encounter order.
    seen: Vec<TokenPair>,
}

impl PairStats {
    /// Counts all n−1 adjacent pairs of `tokens`, left to right.
    ///
    /// Occurrences may overlap positionally: `[a, a, a]` yields pair
    /// `(a, a)` with count 2. Sequences of length ≤ 1 yield empty stats.
    pub(crate) fn scan(tokens: &[Token]) -> Self {
        let mut stats = PairStats::default();
        for window in tokens.windows(2) {
            let pair = TokenPair(window[0], window[1]);
            let count = stats.counts.entry(pair).or_insert(0);
            if *count == 0 {
                stats.seen.push(pair);
            }
            *count += 1;
        }
        stats
    }

    /// The pair with the strictly highest count; ties are broken in favour
    /// of the pair that was first encountered earliest in the scan.
    ///
    /// Returns `None` when the sequence had no adjacent pairs.
    pub(crate) fn best_pair(&self) -> Option<(TokenPair, TokenFreq)> {
        let mut best: Option<(TokenPair, TokenFreq)> = None;
        for &pair in &self.seen {
            let count = self.counts.get(&pair).copied().unwrap_or(0);
            match best {
                Some((_, max)) if count <= max => {}
                _ => best = Some((pair, count)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_overlapping_pairs() {
        // [a, a, a] has (a, a) at positions 0-1 and 1-2.
        let stats = PairStats::scan(&[97, 97, 97]);
        assert_eq!(stats.best_pair(), Some((TokenPair(97, 97), 2)));
    }

    #[test]
    fn test_empty_and_single_sequences() {
        assert_eq!(PairStats::scan(&[]).best_pair(), None);
        assert_eq!(PairStats::scan(&[42]).best_pair(), None);
    }

    #[test]
    fn test_highest_count_wins() {
        // (5, 6) x3 beats (6, 5) x2.
        let stats = PairStats::scan(&[5, 6, 5, 6, 5, 6]);
        assert_eq!(stats.best_pair(), Some((TokenPair(5, 6), 3)));
    }

    #[test]
    fn test_tie_broken_by_first_encounter() {
        // (1,2) and (3,4) both occur twice; (1,2) was seen first.
        let stats = PairStats::scan(&[1, 2, 0, 3, 4, 0, 1, 2, 0, 3, 4]);
        assert_eq!(stats.best_pair(), Some((TokenPair(1, 2), 2)));

        // Same pairs, (3,4) seen first.
        let stats = PairStats::scan(&[3, 4, 0, 1, 2, 0, 3, 4, 0, 1, 2]);
        assert_eq!(stats.best_pair(), Some((TokenPair(3, 4), 2)));
    }

    #[test]
    fn test_all_unique_pairs() {
        let stats = PairStats::scan(&[0, 1, 2, 3]);
        let (_, freq) = stats.best_pair().expect("pairs exist");
        assert_eq!(freq, 1);
    }
}
