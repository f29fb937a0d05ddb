//! Type aliases and shared types for BPE training and encoding.
//!
//! These type aliases provide semantic clarity throughout the codebase.

use serde::{Deserialize, Serialize};

/// Represents a token identifier in the vocabulary.
///
/// Token IDs are assigned sequentially, starting from 0 for the 256 base
/// byte symbols and incrementing by one for each learned merge.
pub type Token = usize;

/// Frequency count for token pairs during training.
///
/// Tracks how many times a token pair appears in the current sequence.
pub(crate) type TokenFreq = usize;

/// Merge order indicates when a merge rule was learned during training.
///
/// Lower values represent earlier merges (e.g., 0 = first merge, 1 = second merge).
pub(crate) type MergeOrder = usize;

/// A sequence of raw bytes.
///
/// Used for representing text as byte sequences and for vocabulary symbols.
pub type ByteSeq = Vec<u8>;

/// A pair of adjacent tokens.
///
/// Used as a key for looking up merge rules during encoding and for
/// tracking pair frequencies during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TokenPair(pub(crate) Token, pub(crate) Token);

/// A learned merge rule: the adjacent pair (`left`, `right`) rewrites to `new`.
///
/// A rule's position in the merge table is its priority; rules learned
/// earlier are replayed first during encoding, so the table order must be
/// preserved exactly when the rules are stored or transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRule {
    /// Left token of the merged pair.
    pub left: Token,
    /// Right token of the merged pair.
    pub right: Token,
    /// Token minted for the merged symbol.
    pub new: Token,
}
