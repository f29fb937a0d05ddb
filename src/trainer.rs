//! BPE training loop: learning merge rules from adjacent-pair statistics.
//!
//! Each step computes pair frequencies over the training sequence, merges
//! the most frequent pair into a freshly minted symbol, and rewrites the
//! sequence in a single left-to-right pass. Training stops when the
//! iteration budget is exhausted or no pair occurs more than once.

use std::fmt;

use indicatif::{ProgressBar, ProgressDrawTarget};

use crate::encoder::merge_pass;
use crate::error::VocabError;
use crate::stats::PairStats;
use crate::tokenizer::Tokenizer;
use crate::types::{MergeRule, Token};
use crate::vocab::{Vocabulary, BYTE_VOCAB_SIZE};

/// Diagnostics from one training run.
///
/// Observability only; correctness is carried by the vocabulary and merge
/// table themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Vocabulary size before any merges (always 256 for byte-level).
    pub starting_vocab_size: usize,
    /// Vocabulary size after training.
    pub final_vocab_size: usize,
    /// Token count of the raw input (one token per byte).
    pub raw_token_count: usize,
    /// Token count of the training sequence after all merges.
    pub post_merge_token_count: usize,
}

impl TrainingSummary {
    /// Post-merge token count as a percentage of the raw byte count.
    ///
    /// Lower is better; values fall in (0, 100]. Empty input reports 100.0.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_token_count == 0 {
            return 100.0;
        }
        self.post_merge_token_count as f64 / self.raw_token_count as f64 * 100.0
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "starting vocab size: {}", self.starting_vocab_size)?;
        writeln!(f, "final vocab size: {}", self.final_vocab_size)?;
        writeln!(f, "total tokens in raw text: {}", self.raw_token_count)?;
        writeln!(f, "total tokens after bpe: {}", self.post_merge_token_count)?;
        write!(f, "compression ratio: {:.2}%", self.compression_ratio())
    }
}

/// Merge learner.
///
/// Owns the growing vocabulary, the merge priority table, and the single
/// training sequence, initialized as one ID per input byte. The trainer is
/// the only mutable stage of the tokenizer lifecycle; once converted into a
/// [`Tokenizer`] the learned state is immutable.
#[derive(Debug)]
pub struct Trainer {
    /// Vocabulary, grown by one entry per merge step.
    vocab: Vocabulary,
    /// Merge rules in discovery order.
    merges: Vec<MergeRule>,
    /// The training sequence, rewritten in place by each merge.
    sequence: Vec<Token>,
    /// Byte length of the original input.
    raw_len: usize,
}

impl Trainer {
    /// Creates a trainer over `text` with a freshly seeded byte-level
    /// vocabulary.
    pub fn new(text: &[u8]) -> Self {
        let sequence: Vec<Token> = text.iter().map(|&b| b as Token).collect();
        Self {
            vocab: Vocabulary::byte_level(),
            merges: Vec::new(),
            raw_len: sequence.len(),
            sequence,
        }
    }

    /// Performs one merge step.
    ///
    /// Returns `Ok(false)` once training has converged: no adjacent pair
    /// occurs more than once, so merging would not compress anything.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::DuplicateSymbol`] if the minted symbol already
    /// exists. Each merged pair is distinct by construction, so this
    /// signals a broken internal invariant rather than a recoverable
    /// condition.
    pub fn merge_step(&mut self) -> Result<bool, VocabError> {
        let stats = PairStats::scan(&self.sequence);
        let (pair, freq) = match stats.best_pair() {
            Some(best) => best,
            None => return Ok(false),
        };
        if freq <= 1 {
            return Ok(false);
        }

        let mut symbol = self.vocab.symbol(pair.0)?.to_vec();
        symbol.extend_from_slice(self.vocab.symbol(pair.1)?);
        let new = self.vocab.define(symbol)?;
        self.merges.push(MergeRule {
            left: pair.0,
            right: pair.1,
            new,
        });

        self.sequence = merge_pass(&self.sequence, pair, new);
        Ok(true)
    }

    /// Runs up to `iteration_budget` merge steps.
    ///
    /// The budget is a hard bound on loop iterations, not wall-clock time;
    /// training may stop earlier when no pair repeats. Extra budget after
    /// convergence is a no-op.
    pub fn train(&mut self, iteration_budget: usize) -> Result<TrainingSummary, VocabError> {
        self.train_with_progress(iteration_budget, false)
    }

    /// Same as [`Trainer::train`], optionally rendering a progress bar over
    /// the iteration budget.
    pub fn train_with_progress(
        &mut self,
        iteration_budget: usize,
        show_progress: bool,
    ) -> Result<TrainingSummary, VocabError> {
        let pb = ProgressBar::new(iteration_budget as u64);
        if show_progress {
            pb.enable_steady_tick(std::time::Duration::from_secs(1));
        } else {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        for _ in 0..iteration_budget {
            if !self.merge_step()? {
                break;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(self.summary())
    }

    /// Diagnostics for the training run so far.
    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            starting_vocab_size: BYTE_VOCAB_SIZE,
            final_vocab_size: self.vocab.len(),
            raw_token_count: self.raw_len,
            post_merge_token_count: self.sequence.len(),
        }
    }

    /// The current training sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.sequence
    }

    /// The vocabulary learned so far.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Merge rules in discovery order.
    pub fn merge_table(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Freezes the learned state into an immutable [`Tokenizer`].
    pub fn into_tokenizer(self) -> Tokenizer {
        Tokenizer::from_parts(self.vocab, self.merges)
    }
}
