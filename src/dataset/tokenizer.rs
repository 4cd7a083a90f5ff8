use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const BOS_TOKEN_ID: u32 = 0;
pub const PAD_TOKEN_ID: u32 = 1;
pub const EOS_TOKEN_ID: u32 = 2;

/// Size of the id space tokens are mapped into.
pub const VOCAB_SIZE: u32 = 50_265;

// Ids 0..=3 stay reserved for special tokens; hashed ids start above them
const RESERVED_IDS: u32 = 4;

pub const DEFAULT_SEQUENCE_LENGTH: usize = 512;

/// Fixed-length token encoding of one contract source. Both vectors are
/// always exactly the encoder's sequence length; the mask is 1 for real
/// tokens (including BOS/EOS) and 0 for padding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenSequence {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u8>,
}

/// Encoder seam for the dataset pipeline. The pipeline borrows the encoder
/// and shares it across worker threads; it never owns model state.
pub trait SequenceEncoder: Send + Sync {
    fn sequence_length(&self) -> usize;
    fn encode(&self, source: &str) -> TokenSequence;
}

/// Default encoder: identifier and number runs plus single punctuation
/// characters, mapped into a fixed vocabulary by stable hashing, framed with
/// BOS/EOS, then padded or truncated to the configured length.
pub struct HashingEncoder {
    max_length: usize,
}

impl HashingEncoder {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    fn split_tokens(source: &str) -> Vec<&str> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (idx, ch) in source.char_indices() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                if start.is_none() {
                    start = Some(idx);
                }
            } else {
                if let Some(word_start) = start.take() {
                    tokens.push(&source[word_start..idx]);
                }
                if !ch.is_whitespace() {
                    tokens.push(&source[idx..idx + ch.len_utf8()]);
                }
            }
        }
        if let Some(word_start) = start {
            tokens.push(&source[word_start..]);
        }

        tokens
    }

    /// Stable hash into the non-reserved id range, same token same id
    fn token_id(token: &str) -> u32 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        RESERVED_IDS + (hasher.finish() % u64::from(VOCAB_SIZE - RESERVED_IDS)) as u32
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_LENGTH)
    }
}

impl SequenceEncoder for HashingEncoder {
    fn sequence_length(&self) -> usize {
        self.max_length
    }

    fn encode(&self, source: &str) -> TokenSequence {
        let body_capacity = self.max_length.saturating_sub(2);
        let mut input_ids = Vec::with_capacity(self.max_length);

        input_ids.push(BOS_TOKEN_ID);
        for token in Self::split_tokens(source).into_iter().take(body_capacity) {
            input_ids.push(Self::token_id(token));
        }
        input_ids.push(EOS_TOKEN_ID);

        let filled = input_ids.len().min(self.max_length);
        input_ids.resize(self.max_length, PAD_TOKEN_ID);

        let mut attention_mask = vec![1u8; filled];
        attention_mask.resize(self.max_length, 0);

        TokenSequence {
            input_ids,
            attention_mask,
        }
    }
}
