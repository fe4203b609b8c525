use serde::{Deserialize, Serialize};

/// A single word with timestamps as delivered by a transcription provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Providers dump this field as either `text` or `word`; both deserialize.
    #[serde(alias = "word")]
    pub text: String,
    /// Seconds from the start of the audio.
    pub start: f64,
    pub end: f64,
}

/// A word reduced to its comparison key, timestamps carried through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWord {
    /// Lower-cased text with every character outside `[A-Za-z0-9_]` removed.
    /// May be empty; empty keys compare like any other key.
    pub key: String,
    pub start: f64,
    pub end: f64,
}

/// A pair of words that aligned by key, with the timestamp deltas between them.
/// `start_diff`/`end_diff` are streaming minus batch, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedWord {
    pub word: String,
    pub index_a: usize,
    pub index_b: usize,
    pub batch_start: f64,
    pub batch_end: f64,
    pub ws_start: f64,
    pub ws_end: f64,
    pub start_diff: f64,
    pub end_diff: f64,
}

/// One position in the alignment walk. Across a full run the events partition
/// both input sequences: every batch index lands in exactly one of
/// {Match, Substitution, Deletion, Unresolved} and every streaming index in
/// exactly one of {Match, Substitution, Insertion, Unresolved}, in increasing
/// index order. Nothing is emitted past an `Unresolved`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignmentEvent {
    Match(MatchedWord),
    /// One batch word replaced by one streaming word at the same walk position.
    Substitution {
        index_a: usize,
        index_b: usize,
        word_a: String,
        word_b: String,
        batch_start: f64,
        ws_start: f64,
    },
    /// Word present only in the streaming sequence.
    Insertion {
        index_b: usize,
        word: String,
        ws_start: f64,
    },
    /// Word present only in the batch sequence.
    Deletion {
        index_a: usize,
        word: String,
        batch_start: f64,
    },
    /// Divergence the bounded search could not resolve; terminates the run.
    Unresolved { index_a: usize, index_b: usize },
}

impl AlignmentEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Match(_) => "match",
            Self::Substitution { .. } => "substitution",
            Self::Insertion { .. } => "insertion",
            Self::Deletion { .. } => "deletion",
            Self::Unresolved { .. } => "unresolved",
        }
    }
}

/// Aggregate counters accumulated over one alignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Summary {
    pub batch_word_count: usize,
    pub ws_word_count: usize,
    pub matched: usize,
    /// Every non-match event: insertions, deletions, substitutions, and the
    /// terminal unresolved divergence if one occurred.
    pub mismatched: usize,
    /// Matches whose `|start_diff|` exceeded the configured drift threshold.
    pub significant_drift_count: usize,
    /// `start_diff` of the last match emitted; 0.0 when nothing matched.
    pub final_drift: f64,
    pub matches: Vec<MatchedWord>,
}

/// Full result of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub events: Vec<AlignmentEvent>,
    pub summary: Summary,
}
