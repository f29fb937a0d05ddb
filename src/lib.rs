//! Byte-level BPE (Byte-Pair Encoding) tokenizer.
//!
//! Seeds a 256-entry base vocabulary (one symbol per byte value), learns a
//! merge priority table by repeatedly fusing the most frequent adjacent
//! token pair in a training text, and applies the learned rules to encode
//! arbitrary text into token IDs. Decoding is the exact byte-level inverse:
//! `decode(encode(text)) == text` for any input.
//!
//! Training and encoding are deterministic pure computations. A trained
//! [`Tokenizer`] is immutable and safe to share read-only across threads;
//! only a [`Trainer`] mutates state, and each training run owns its own.
//!
//! ```
//! let (tokenizer, summary) = bytebpe::train(b"abab", 2).expect("training failed");
//! assert_eq!(summary.final_vocab_size, 257);
//!
//! let ids = tokenizer.encode("ab");
//! assert_eq!(ids, vec![256]);
//! assert_eq!(tokenizer.decode(&ids).expect("decoding failed"), b"ab");
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]

mod encoder;
mod error;
mod model;
mod stats;
mod tokenizer;
mod trainer;
mod types;
mod vocab;

pub use error::{DecodeError, EncodeError, ErrorMode, ModelError, VocabError};
pub use model::TokenizerModel;
pub use tokenizer::Tokenizer;
pub use trainer::{Trainer, TrainingSummary};
pub use types::{ByteSeq, MergeRule, Token};
pub use vocab::{Vocabulary, BYTE_VOCAB_SIZE};

/// Trains a tokenizer on `text` with at most `iteration_budget` merges.
///
/// Convenience over [`Trainer`]: seeds the byte-level vocabulary, runs the
/// merge loop to convergence or budget exhaustion, and freezes the result.
///
/// # Errors
///
/// Returns [`VocabError`] only on internal invariant violations; training
/// never fails on valid input, including empty text.
pub fn train(
    text: &[u8],
    iteration_budget: usize,
) -> Result<(Tokenizer, TrainingSummary), VocabError> {
    let mut trainer = Trainer::new(text);
    let summary = trainer.train(iteration_budget)?;
    Ok((trainer.into_tokenizer(), summary))
}
