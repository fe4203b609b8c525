use crate::error::DriftError;
use crate::types::{NormalizedWord, WordRecord};

/// Normalization seam. Implementations must be order- and length-preserving:
/// index `n` of the output corresponds to index `n` of the input.
pub trait WordNormalizer: Send + Sync {
    fn normalize(&self, words: &[WordRecord]) -> Vec<NormalizedWord>;
}

/// A finished transcription, however it was produced: a batch API call, a
/// drained streaming session, or a file dump of either. The comparer never
/// sees audio or network machinery, only the resulting word list.
pub trait TranscriptSource {
    fn label(&self) -> String;
    fn words(&self) -> Result<Vec<WordRecord>, DriftError>;
}
