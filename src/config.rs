/// Tunables for one comparison run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Chebyshev radius of the resynchronization search. Widening it is the
    /// only recovery strategy for an unresolved divergence.
    pub max_search_distance: usize,
    /// Matches with `|start_diff|` above this count as significant drift.
    pub drift_threshold_sec: f64,
}

impl CompareConfig {
    pub const DEFAULT_MAX_SEARCH_DISTANCE: usize = 3;
    pub const DEFAULT_DRIFT_THRESHOLD_SEC: f64 = 0.1;
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_search_distance: Self::DEFAULT_MAX_SEARCH_DISTANCE,
            drift_threshold_sec: Self::DEFAULT_DRIFT_THRESHOLD_SEC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_config_default() {
        let config = CompareConfig::default();
        assert_eq!(
            config.max_search_distance,
            CompareConfig::DEFAULT_MAX_SEARCH_DISTANCE
        );
        assert_eq!(config.max_search_distance, 3);
        assert!((config.drift_threshold_sec - 0.1).abs() < 1e-12);
    }
}
