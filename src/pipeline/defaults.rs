use crate::alignment::normalize::normalize_words;
use crate::pipeline::traits::WordNormalizer;
use crate::types::{NormalizedWord, WordRecord};

/// Default normalizer: ASCII word-character keys, case folded.
pub struct AsciiKeyNormalizer;

impl WordNormalizer for AsciiKeyNormalizer {
    fn normalize(&self, words: &[WordRecord]) -> Vec<NormalizedWord> {
        normalize_words(words)
    }
}
