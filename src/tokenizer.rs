//! Encode/decode pipeline over a trained vocabulary and merge table.
//!
//! A [`Tokenizer`] is immutable once built, so it can be shared read-only
//! across threads; the batch methods lean on that to encode and decode in
//! parallel via Rayon, with optional progress reporting.

use indicatif::{style::TemplateError, ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::encoder::MergeReplay;
use crate::error::{DecodeError, EncodeError, ErrorMode};
use crate::model::TokenizerModel;
use crate::types::{ByteSeq, MergeRule, Token};
use crate::vocab::Vocabulary;

/// Byte-level BPE tokenizer: base vocabulary plus learned merge rules.
///
/// Encoding maps text bytes to base IDs and replays learned merges in
/// training order; decoding concatenates each ID's symbol bytes back into
/// the original byte sequence. `decode(encode(text)) == text` for any
/// input, because merging only groups adjacent bytes under new IDs and
/// never discards information.
pub struct Tokenizer {
    vocab: Vocabulary,
    merges: Vec<MergeRule>,
    replay: MergeReplay,
}

impl Tokenizer {
    /// Builds a tokenizer from a vocabulary and its ordered merge table.
    ///
    /// Callers must guarantee consistency between the two; the trainer and
    /// the validated model loader are the only construction paths.
    pub(crate) fn from_parts(vocab: Vocabulary, merges: Vec<MergeRule>) -> Self {
        let replay = MergeReplay::new(&merges);
        Self {
            vocab,
            merges,
            replay,
        }
    }

    /// Encodes text: UTF-8 bytes → base IDs → merge replay.
    ///
    /// Infallible: the base layer always covers all 256 byte values, and
    /// empty text yields an empty sequence.
    pub fn encode(&self, text: &str) -> Vec<Token> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encodes a raw byte sequence.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Vec<Token> {
        let base: Vec<Token> = bytes.iter().map(|&b| b as Token).collect();
        self.replay.apply(base)
    }

    /// Encodes many texts in parallel using Rayon.
    ///
    /// Results are returned in the same order as the input texts.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ProgressBarSetup`] if the progress bar
    /// template fails to compile.
    pub fn encode_batch(
        &self,
        texts: &[&str],
        show_progress: bool,
    ) -> Result<Vec<Vec<Token>>, EncodeError> {
        let pb = progress_bar(texts.len() as u64, "Encoding texts", show_progress)?;
        Ok(texts
            .par_iter()
            .progress_with(pb)
            .map(|text| self.encode(text))
            .collect())
    }

    /// Decodes token IDs back to the exact bytes they encode.
    ///
    /// No character-validity checks are performed; adversarial or partial
    /// sequences may concatenate to bytes that are not valid text, which is
    /// the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownToken`] naming the first ID with no
    /// vocabulary entry.
    pub fn decode(&self, tokens: &[Token]) -> Result<ByteSeq, DecodeError> {
        let mut out = Vec::new();
        for &token in tokens {
            match self.vocab.get(token) {
                Some(bytes) => out.extend_from_slice(bytes),
                None => return Err(DecodeError::UnknownToken(token)),
            }
        }
        Ok(out)
    }

    /// Decodes token IDs and interprets the bytes as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownToken`] for an ID with no vocabulary
    /// entry, or [`DecodeError::InvalidUtf8`] in [`ErrorMode::Strict`] when
    /// the decoded bytes are not valid UTF-8.
    pub fn decode_text(&self, tokens: &[Token], errors: ErrorMode) -> Result<String, DecodeError> {
        let bytes = self.decode(tokens)?;
        match errors {
            ErrorMode::Strict => String::from_utf8(bytes).map_err(DecodeError::InvalidUtf8),
            ErrorMode::Replace => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    /// Decodes many token sequences in parallel using Rayon.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] from any sequence, or
    /// [`DecodeError::ProgressBarSetup`] if the progress bar template fails
    /// to compile.
    pub fn decode_batch(
        &self,
        token_seqs: &[&[Token]],
        show_progress: bool,
    ) -> Result<Vec<ByteSeq>, DecodeError> {
        let pb = progress_bar(token_seqs.len() as u64, "Decoding tokens", show_progress)?;
        token_seqs
            .par_iter()
            .progress_with(pb)
            .map(|tokens| self.decode(tokens))
            .collect()
    }

    /// Total number of vocabulary entries (256 base + learned merges).
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Number of learned merge rules.
    pub fn num_merges(&self) -> usize {
        self.replay.len()
    }

    /// The trained vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Merge rules in discovery order.
    pub fn merge_table(&self) -> &[MergeRule] {
        &self.merges
    }

    /// Snapshot of the trained state for persistence.
    pub fn to_model(&self) -> TokenizerModel {
        TokenizerModel {
            vocab: self.vocab.symbols().to_vec(),
            merges: self.merges.clone(),
        }
    }
}

/// Styled progress bar over `size` steps, hidden when `show` is false.
fn progress_bar(size: u64, msg: &str, show: bool) -> Result<ProgressBar, TemplateError> {
    let pb = ProgressBar::new(size);
    if !show {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        return Ok(pb);
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg:<30!} {wide_bar} {pos}/{len}")?;
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_secs(1));

    Ok(pb)
}
