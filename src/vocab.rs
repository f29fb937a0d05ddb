//! Append-only vocabulary mapping token IDs to byte-string symbols.

use std::collections::HashMap;

use crate::error::VocabError;
use crate::types::{ByteSeq, Token};

/// Number of base symbols in a byte-level vocabulary, one per byte value.
pub const BYTE_VOCAB_SIZE: usize = 256;

/// Bidirectional symbol ↔ ID mapping.
///
/// Symbols live in an append-only arena indexed by ID; a hash map provides
/// the reverse direction. Entries are never removed or reassigned, so IDs
/// stay dense: every ID in `[0, len)` is defined and no two symbols share
/// an ID.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Symbols indexed by token ID.
    symbols: Vec<ByteSeq>,
    /// Reverse lookup: symbol bytes -> token ID.
    ids: HashMap<ByteSeq, Token>,
}

impl Vocabulary {
    /// Byte-level base vocabulary: IDs 0-255 map to the single bytes in
    /// ascending value order.
    pub fn byte_level() -> Self {
        let mut symbols = Vec::with_capacity(BYTE_VOCAB_SIZE);
        let mut ids = HashMap::with_capacity(BYTE_VOCAB_SIZE);
        for b in 0..=u8::MAX {
            symbols.push(vec![b]);
            ids.insert(vec![b], b as Token);
        }
        Self { symbols, ids }
    }

    /// Allocates the next sequential ID for a new merged symbol and records
    /// both mapping directions.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::DuplicateSymbol`] if the symbol already has an
    /// ID. Training mints each merged symbol exactly once, so hitting this
    /// means an internal invariant was violated.
    pub fn define(&mut self, symbol: ByteSeq) -> Result<Token, VocabError> {
        if self.ids.contains_key(&symbol) {
            return Err(VocabError::DuplicateSymbol(symbol));
        }
        let id = self.symbols.len();
        self.ids.insert(symbol.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Looks up the byte-string symbol for a token ID.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnknownId`] if the ID has no entry.
    pub fn symbol(&self, id: Token) -> Result<&[u8], VocabError> {
        self.symbols
            .get(id)
            .map(Vec::as_slice)
            .ok_or(VocabError::UnknownId(id))
    }

    /// Looks up the token ID for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`VocabError::UnknownSymbol`] if the symbol has no entry.
    pub fn id(&self, symbol: &[u8]) -> Result<Token, VocabError> {
        self.ids
            .get(symbol)
            .copied()
            .ok_or_else(|| VocabError::UnknownSymbol(symbol.to_vec()))
    }

    /// Infallible symbol lookup for decode hot paths.
    pub(crate) fn get(&self, id: Token) -> Option<&[u8]> {
        self.symbols.get(id).map(Vec::as_slice)
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if no symbols are defined.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The ID-ordered symbol table, for persistence.
    pub(crate) fn symbols(&self) -> &[ByteSeq] {
        &self.symbols
    }

    /// Rebuilds a vocabulary from an ID-ordered symbol table.
    ///
    /// The caller is responsible for validating the table first; this is
    /// only reachable through the model loading path.
    pub(crate) fn from_symbols(symbols: Vec<ByteSeq>) -> Self {
        let ids = symbols
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, symbol)| (symbol, id))
            .collect();
        Self { symbols, ids }
    }
}
