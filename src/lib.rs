pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::differ::{align, align_normalized};
pub use alignment::normalize::{normalize_key, normalize_words};
pub use alignment::report::{
    build_report, compute_drift_stats, render_text, ComparisonReport, DriftStats, Meta,
    SCHEMA_VERSION,
};
pub use alignment::search::find_matching_index;
pub use config::CompareConfig;
pub use error::DriftError;
pub use pipeline::builder::DriftComparerBuilder;
pub use pipeline::defaults::AsciiKeyNormalizer;
pub use pipeline::runtime::DriftComparer;
pub use pipeline::traits::{TranscriptSource, WordNormalizer};
pub use types::{AlignmentEvent, Comparison, MatchedWord, NormalizedWord, Summary, WordRecord};
