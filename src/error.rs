//! Error types for vocabulary, codec, and persistence operations.

use std::str::FromStr;

use indicatif::style::TemplateError;
use thiserror::Error;

use crate::types::Token;

/// Controls how UTF-8 decoding errors are handled when turning decoded
/// bytes back into a `String`.
///
/// Unknown token IDs always produce errors regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Raise an error on invalid UTF-8.
    Strict,
    /// Replace invalid UTF-8 sequences with U+FFFD.
    Replace,
}

impl FromStr for ErrorMode {
    type Err = String;

    /// Parses an error mode string ("strict" or "replace").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "replace" => Ok(Self::Replace),
            _ => Err(format!(
                "invalid error mode: {s:?} (expected \"strict\" or \"replace\")"
            )),
        }
    }
}

/// Errors raised by vocabulary operations.
///
/// `DuplicateSymbol` can only occur if merge uniqueness was violated
/// upstream; it signals a broken internal invariant, not a caller mistake.
#[derive(Debug, Error)]
pub enum VocabError {
    /// Symbol already has an ID assigned.
    #[error("symbol {0:?} is already defined")]
    DuplicateSymbol(Vec<u8>),
    /// Token ID has no vocabulary entry.
    #[error("unknown token id: {0}")]
    UnknownId(Token),
    /// Symbol has no vocabulary entry.
    #[error("unknown symbol: {0:?}")]
    UnknownSymbol(Vec<u8>),
}

/// Errors that can occur during token decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Token ID not found in vocabulary. Carries the offending ID.
    #[error("unknown token id: {0}")]
    UnknownToken(Token),
    /// Decoded bytes are not valid UTF-8 (strict mode only).
    #[error("invalid UTF-8 in decoded bytes: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// Progress bar template string was invalid.
    #[error("template parsing failed: {0}")]
    ProgressBarSetup(#[from] TemplateError),
}

/// Errors that can occur during batch encoding.
///
/// Encoding a single text is infallible: the base layer always covers all
/// 256 byte values, so only the batch progress reporting can fail.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Progress bar template string was invalid.
    #[error("template parsing failed: {0}")]
    ProgressBarSetup(#[from] TemplateError),
}

/// Errors that can occur when saving or loading a tokenizer model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization or deserialization failed.
    #[error("serde_json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The model deserialized cleanly but violates a structural invariant.
    #[error("corrupt tokenizer model: {0}")]
    Corrupt(String),
}
