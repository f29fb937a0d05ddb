//! Merge replay: applying a learned merge priority table to token sequences.
//!
//! Encoding must reproduce the compression the sequence would have received
//! had it been part of the training corpus. Rules learned earlier during
//! training outrank later ones, and replay always applies the
//! highest-priority rule that still has an adjacent occurrence anywhere in
//! the sequence.

use std::collections::HashMap;

use crate::types::{MergeOrder, MergeRule, Token, TokenPair};

/// Replaces every adjacent, non-overlapping occurrence of `pair` with `new`
/// in one left-to-right pass.
///
/// A replacement consumes both positions and scanning resumes after them,
/// so a token written by this pass is never half of another match in the
/// same pass. Both the training loop and encode-time replay rewrite
/// sequences through this single function.
pub(crate) fn merge_pass(tokens: &[Token], pair: TokenPair, new: Token) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if i + 1 < tokens.len() && tokens[i] == pair.0 && tokens[i + 1] == pair.1 {
            out.push(new);
            i += 2;
        } else {
            out.push(tokens[i]);
            i += 1;
        }
    }
    out
}

/// Learned merge rules indexed for encode-time replay.
#[derive(Debug, Clone)]
pub(crate) struct MergeReplay {
    /// Maps token pairs to (merged token, discovery order).
    ///
    /// Lower discovery order means higher priority.
    merges: HashMap<TokenPair, (Token, MergeOrder)>,
}

impl MergeReplay {
    /// Indexes an ordered rule list. The position of each rule in `rules`
    /// is its discovery order and therefore its replay priority.
    pub(crate) fn new(rules: &[MergeRule]) -> Self {
        let merges = rules
            .iter()
            .enumerate()
            .map(|(order, rule)| (TokenPair(rule.left, rule.right), (rule.new, order)))
            .collect();
        Self { merges }
    }

    /// Applies learned merges until no rule's pair occurs anywhere.
    ///
    /// Each round selects the lowest-discovery-order rule with an adjacent
    /// occurrence and rewrites all its non-overlapping occurrences in one
    /// pass. A pass can only create pairs involving the freshly minted
    /// token, and every rule over that token was discovered later, so no
    /// earlier rule ever becomes applicable again once it has been passed
    /// over.
    pub(crate) fn apply(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        if tokens.len() <= 1 || self.merges.is_empty() {
            return tokens;
        }

        loop {
            let mut next: Option<(TokenPair, Token, MergeOrder)> = None;
            for window in tokens.windows(2) {
                let pair = TokenPair(window[0], window[1]);
                if let Some(&(new, order)) = self.merges.get(&pair) {
                    let better = match next {
                        Some((_, _, best)) => order < best,
                        None => true,
                    };
                    if better {
                        next = Some((pair, new, order));
                    }
                }
            }

            let (pair, new, _) = match next {
                Some(found) => found,
                None => return tokens,
            };
            tokens = merge_pass(&tokens, pair, new);
        }
    }

    /// Number of indexed merge rules.
    pub(crate) fn len(&self) -> usize {
        self.merges.len()
    }
}
