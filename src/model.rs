//! Saved tokenizer artifacts: the vocabulary table plus the ordered merge
//! rule list.
//!
//! The merge list order is semantically meaningful (it encodes replay
//! priority), so the serialized form preserves it exactly. Loading
//! validates the structural invariants before handing back a usable
//! tokenizer, so a corrupt or hand-edited file is rejected rather than
//! silently producing wrong encodings.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::tokenizer::Tokenizer;
use crate::types::{ByteSeq, MergeRule};
use crate::vocab::{Vocabulary, BYTE_VOCAB_SIZE};

/// Serialized form of a trained tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerModel {
    /// Symbols indexed by token ID, the 256 base bytes first.
    pub vocab: Vec<ByteSeq>,
    /// Merge rules in discovery order; position encodes replay priority.
    pub merges: Vec<MergeRule>,
}

impl TokenizerModel {
    /// Writes the model as JSON, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] or [`ModelError::Json`] on filesystem or
    /// serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a model from JSON and builds a validated [`Tokenizer`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`]/[`ModelError::Json`] on read or parse
    /// failure, or [`ModelError::Corrupt`] when the parsed model violates a
    /// structural invariant.
    pub fn load(path: &Path) -> Result<Tokenizer, ModelError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let model: TokenizerModel = serde_json::from_reader(reader)?;
        model.into_tokenizer()
    }

    /// Validates the structural invariants and builds a [`Tokenizer`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Corrupt`] describing the first violated
    /// invariant.
    pub fn into_tokenizer(self) -> Result<Tokenizer, ModelError> {
        self.validate()?;
        Ok(Tokenizer::from_parts(
            Vocabulary::from_symbols(self.vocab),
            self.merges,
        ))
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.vocab.len() != BYTE_VOCAB_SIZE + self.merges.len() {
            return Err(ModelError::Corrupt(format!(
                "vocab has {} entries but {} merges imply {}",
                self.vocab.len(),
                self.merges.len(),
                BYTE_VOCAB_SIZE + self.merges.len()
            )));
        }

        for (id, symbol) in self.vocab.iter().take(BYTE_VOCAB_SIZE).enumerate() {
            if symbol.as_slice() != [id as u8] {
                return Err(ModelError::Corrupt(format!(
                    "base entry {id} is not the single byte {id}"
                )));
            }
        }

        for (order, rule) in self.merges.iter().enumerate() {
            let expected = BYTE_VOCAB_SIZE + order;
            if rule.new != expected {
                return Err(ModelError::Corrupt(format!(
                    "merge {order} mints id {} but ids are allocation-ordered, expected {expected}",
                    rule.new
                )));
            }
            if rule.left >= expected || rule.right >= expected {
                return Err(ModelError::Corrupt(format!(
                    "merge {order} references id {} before it is defined",
                    rule.left.max(rule.right)
                )));
            }
            let mut symbol = self.vocab[rule.left].clone();
            symbol.extend_from_slice(&self.vocab[rule.right]);
            if self.vocab[rule.new] != symbol {
                return Err(ModelError::Corrupt(format!(
                    "merge {order} symbol does not concatenate its operands"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::Trainer;
    use crate::types::Token;

    fn trained_model(text: &[u8], budget: usize) -> TokenizerModel {
        let mut trainer = Trainer::new(text);
        trainer.train(budget).expect("training failed");
        trainer.into_tokenizer().to_model()
    }

    #[test]
    fn test_model_rebuilds_equivalent_tokenizer() {
        let model = trained_model(b"abab abab", 4);
        let tok = model.clone().into_tokenizer().expect("validation failed");
        assert_eq!(tok.vocab_size(), 256 + model.merges.len());
        assert_eq!(tok.encode("abab"), {
            let mut trainer = Trainer::new(b"abab abab");
            trainer.train(4).expect("training failed");
            trainer.into_tokenizer().encode("abab")
        });
    }

    #[test]
    fn test_rejects_wrong_vocab_length() {
        let mut model = trained_model(b"abab", 2);
        model.vocab.push(b"extra".to_vec());
        assert!(matches!(
            model.into_tokenizer(),
            Err(ModelError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_tampered_base_layer() {
        let mut model = trained_model(b"abab", 2);
        model.vocab[10] = b"xx".to_vec();
        assert!(matches!(
            model.into_tokenizer(),
            Err(ModelError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_order_merge_ids() {
        let mut model = trained_model(b"abab abab abcd abcd", 6);
        if model.merges.len() < 2 {
            panic!("test corpus produced too few merges");
        }
        model.merges.swap(0, 1);
        assert!(matches!(
            model.into_tokenizer(),
            Err(ModelError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_forward_reference() {
        let mut model = trained_model(b"abab", 2);
        let last = model.merges.len() - 1;
        model.merges[last].left = 9999 as Token;
        assert!(matches!(
            model.into_tokenizer(),
            Err(ModelError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_merge_symbol() {
        let mut model = trained_model(b"abab", 2);
        model.vocab[256] = b"zz".to_vec();
        assert!(matches!(
            model.into_tokenizer(),
            Err(ModelError::Corrupt(_))
        ));
    }
}
