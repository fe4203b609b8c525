use crate::alignment::differ::align_normalized;
use crate::config::CompareConfig;
use crate::error::DriftError;
use crate::pipeline::traits::{TranscriptSource, WordNormalizer};
use crate::types::{Comparison, WordRecord};

/// Compares a batch (reference) transcript against a streaming one.
/// Construct through [`crate::pipeline::builder::DriftComparerBuilder`].
pub struct DriftComparer {
    config: CompareConfig,
    normalizer: Box<dyn WordNormalizer>,
}

pub(crate) struct DriftComparerParts {
    pub config: CompareConfig,
    pub normalizer: Box<dyn WordNormalizer>,
}

impl DriftComparer {
    pub(crate) fn from_parts(parts: DriftComparerParts) -> Self {
        Self {
            config: parts.config,
            normalizer: parts.normalizer,
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Align two fully materialized word sequences. Infallible: an unresolved
    /// divergence is reported as the terminal event, not an error.
    pub fn compare(&self, batch: &[WordRecord], ws: &[WordRecord]) -> Comparison {
        let normalized_batch = self.normalizer.normalize(batch);
        let normalized_ws = self.normalizer.normalize(ws);
        align_normalized(batch, &normalized_batch, ws, &normalized_ws, &self.config)
    }

    /// Fetch both word lists from their sources, then compare.
    pub fn compare_sources(
        &self,
        batch: &dyn TranscriptSource,
        ws: &dyn TranscriptSource,
    ) -> Result<Comparison, DriftError> {
        let batch_words = batch.words()?;
        let ws_words = ws.words()?;
        tracing::debug!(
            batch_label = %batch.label(),
            ws_label = %ws.label(),
            batch_words = batch_words.len(),
            ws_words = ws_words.len(),
            "comparing transcripts"
        );
        Ok(self.compare(&batch_words, &ws_words))
    }
}
