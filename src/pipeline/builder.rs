use crate::config::CompareConfig;
use crate::error::DriftError;
use crate::pipeline::defaults::AsciiKeyNormalizer;
use crate::pipeline::runtime::{DriftComparer, DriftComparerParts};
use crate::pipeline::traits::WordNormalizer;

pub struct DriftComparerBuilder {
    config: CompareConfig,
    normalizer: Option<Box<dyn WordNormalizer>>,
}

impl DriftComparerBuilder {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            normalizer: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn WordNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn build(self) -> Result<DriftComparer, DriftError> {
        if self.config.max_search_distance == 0 {
            return Err(DriftError::invalid_input(
                "max_search_distance must be at least 1; a zero bound makes every divergence unresolvable",
            ));
        }
        if !self.config.drift_threshold_sec.is_finite() || self.config.drift_threshold_sec < 0.0 {
            return Err(DriftError::invalid_input(format!(
                "drift_threshold_sec must be finite and non-negative, got {}",
                self.config.drift_threshold_sec
            )));
        }

        Ok(DriftComparer::from_parts(DriftComparerParts {
            config: self.config,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(AsciiKeyNormalizer)),
        }))
    }
}
