use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use transcript_drift::{
    build_report, render_text, CompareConfig, DriftComparerBuilder, DriftError, Meta,
    TranscriptSource, WordRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "drift_report")]
#[command(about = "Compare word timestamps between a batch and a streaming transcript")]
struct Args {
    /// JSON word list from the batch (reference) transcription.
    batch: PathBuf,
    /// JSON word list from the streaming transcription.
    ws: PathBuf,
    /// Chebyshev radius of the resynchronization search.
    #[arg(long, env = "DRIFT_REPORT_MAX_DISTANCE", default_value_t = CompareConfig::DEFAULT_MAX_SEARCH_DISTANCE)]
    max_distance: usize,
    /// Drift above this many seconds counts as significant.
    #[arg(long, env = "DRIFT_REPORT_THRESHOLD", default_value_t = CompareConfig::DEFAULT_DRIFT_THRESHOLD_SEC)]
    drift_threshold: f64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the rendered output here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print every match row instead of the thinned drift table.
    #[arg(long)]
    show_all: bool,
}

/// Word lists arrive either as a bare array or wrapped in `{ "words": [...] }`
/// the way provider dumps usually are.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordListFile {
    Bare(Vec<WordRecord>),
    Wrapped { words: Vec<WordRecord> },
}

struct JsonFileSource {
    path: PathBuf,
}

impl TranscriptSource for JsonFileSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn words(&self) -> Result<Vec<WordRecord>, DriftError> {
        load_words(&self.path)
    }
}

fn load_words(path: &Path) -> Result<Vec<WordRecord>, DriftError> {
    let data = fs::read_to_string(path).map_err(|e| DriftError::io("read word list", e))?;
    let parsed: WordListFile =
        serde_json::from_str(&data).map_err(|e| DriftError::json("parse word list", e))?;
    Ok(match parsed {
        WordListFile::Bare(words) => words,
        WordListFile::Wrapped { words } => words,
    })
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), DriftError> {
    let config = CompareConfig {
        max_search_distance: args.max_distance,
        drift_threshold_sec: args.drift_threshold,
    };
    let comparer = DriftComparerBuilder::new(config.clone()).build()?;

    let batch = JsonFileSource {
        path: args.batch.clone(),
    };
    let ws = JsonFileSource {
        path: args.ws.clone(),
    };
    let comparison = comparer.compare_sources(&batch, &ws)?;

    let rendered = match args.format {
        OutputFormat::Text => render_text(&comparison, &config, args.show_all),
        OutputFormat::Json => {
            let report = build_report(
                &comparison,
                Meta {
                    generated_at: Utc::now().to_rfc3339(),
                    batch_label: batch.label(),
                    ws_label: ws.label(),
                    max_search_distance: config.max_search_distance,
                    drift_threshold_sec: config.drift_threshold_sec,
                },
            )?;
            let mut json = serde_json::to_string_pretty(&report)
                .map_err(|e| DriftError::json("serialize report", e))?;
            json.push('\n');
            json
        }
    };

    match &args.out {
        Some(path) => fs::write(path, rendered).map_err(|e| DriftError::io("write report", e))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
