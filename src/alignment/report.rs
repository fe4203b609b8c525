use std::cmp::Ordering;

use serde::Serialize;

use crate::config::CompareConfig;
use crate::error::DriftError;
use crate::types::{AlignmentEvent, Comparison, MatchedWord, Summary};

pub const SCHEMA_VERSION: u32 = 1;

const TABLE_WIDTH: usize = 90;
const WORD_COL_WIDTH: usize = 20;
const ALWAYS_SHOW_FIRST_MATCHES: usize = 5;
const ALWAYS_SHOW_LAST_INDICES: usize = 5;
const PERIODIC_ROW_EVERY: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub schema_version: u32,
    pub meta: Meta,
    pub events: Vec<AlignmentEvent>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_stats: Option<DriftStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub batch_label: String,
    pub ws_label: String,
    pub max_search_distance: usize,
    pub drift_threshold_sec: f64,
}

/// Distribution of matched-word start drift, in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct DriftStats {
    pub mean: f32,
    pub p50: f32,
    pub p90: f32,
    pub max_abs: f32,
}

pub fn build_report(
    comparison: &Comparison,
    meta: Meta,
) -> Result<ComparisonReport, DriftError> {
    Ok(ComparisonReport {
        schema_version: SCHEMA_VERSION,
        meta,
        events: comparison.events.clone(),
        summary: comparison.summary.clone(),
        drift_stats: compute_drift_stats(&comparison.summary.matches)?,
    })
}

pub fn compute_drift_stats(matches: &[MatchedWord]) -> Result<Option<DriftStats>, DriftError> {
    if matches.is_empty() {
        return Ok(None);
    }

    let mut sorted: Vec<f64> = matches.iter().map(|m| m.start_diff).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let max_abs = sorted.iter().fold(0.0f64, |cur, value| cur.max(value.abs()));

    Ok(Some(DriftStats {
        mean: checked_f32(mean(&sorted), "drift.mean")?,
        p50: checked_f32(median_sorted(&sorted), "drift.p50")?,
        p90: checked_f32(percentile_sorted(&sorted, 0.9), "drift.p90")?,
        max_abs: checked_f32(max_abs, "drift.max_abs")?,
    }))
}

/// Render the fixed-width drift table plus summary footer.
///
/// With `show_all` off, match rows are thinned to keep long transcripts
/// readable: rows with drift beyond the threshold, the first few matches, the
/// tail of the batch sequence, and one periodic row are always shown.
/// Non-match rows are never thinned.
pub fn render_text(comparison: &Comparison, config: &CompareConfig, show_all: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(TABLE_WIDTH);

    out.push_str("Timestamp Comparison (Batch vs Streaming)\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{}{}{}{}{}{}\n",
        pad("Batch Idx", 12),
        pad("WS Idx", 12),
        pad("Word", WORD_COL_WIDTH),
        pad("Batch Start", 15),
        pad("WS Start", 15),
        "Drift (WS-Batch)"
    ));
    out.push_str(&rule);
    out.push('\n');

    let batch_count = comparison.summary.batch_word_count;
    let mut matched_so_far = 0usize;
    for event in &comparison.events {
        match event {
            AlignmentEvent::Match(m) => {
                let significant = m.start_diff.abs() > config.drift_threshold_sec;
                let show = show_all
                    || significant
                    || matched_so_far < ALWAYS_SHOW_FIRST_MATCHES
                    || m.index_a + ALWAYS_SHOW_LAST_INDICES > batch_count
                    || matched_so_far % PERIODIC_ROW_EVERY == 0;
                if show {
                    let drift = format!(
                        "{}{:.3}s",
                        if m.start_diff > 0.0 { "+" } else { "" },
                        m.start_diff
                    );
                    out.push_str(&format!(
                        "{}{}{}{}{}{}\n",
                        pad(&m.index_a.to_string(), 12),
                        pad(&m.index_b.to_string(), 12),
                        word_cell(&m.word),
                        pad(&format!("{:.3}", m.batch_start), 15),
                        pad(&format!("{:.3}", m.ws_start), 15),
                        drift
                    ));
                }
                matched_so_far += 1;
            }
            AlignmentEvent::Substitution {
                index_a,
                index_b,
                word_a,
                word_b,
                batch_start,
                ws_start,
            } => {
                out.push_str(&format!(
                    "{}{}{}{}{}(substitution)\n",
                    pad(&index_a.to_string(), 12),
                    pad(&index_b.to_string(), 12),
                    word_cell(&format!("[{word_a}->{word_b}]")),
                    pad(&format!("{batch_start:.3}"), 15),
                    pad(&format!("{ws_start:.3}"), 15),
                ));
            }
            AlignmentEvent::Insertion {
                index_b,
                word,
                ws_start,
            } => {
                out.push_str(&format!(
                    "{}{}{}{}{}(insertion)\n",
                    pad("---", 12),
                    pad(&index_b.to_string(), 12),
                    word_cell(&format!("[+{word}]")),
                    pad("---", 15),
                    pad(&format!("{ws_start:.3}"), 15),
                ));
            }
            AlignmentEvent::Deletion {
                index_a,
                word,
                batch_start,
            } => {
                out.push_str(&format!(
                    "{}{}{}{}{}(deletion)\n",
                    pad(&index_a.to_string(), 12),
                    pad("---", 12),
                    word_cell(&format!("[-{word}]")),
                    pad(&format!("{batch_start:.3}"), 15),
                    pad("---", 15),
                ));
            }
            AlignmentEvent::Unresolved { index_a, index_b } => {
                out.push_str(&format!(
                    "{}{}{}{}{}(unresolved)\n",
                    pad(&index_a.to_string(), 12),
                    pad(&index_b.to_string(), 12),
                    word_cell("[?]"),
                    pad("---", 15),
                    pad("---", 15),
                ));
            }
        }
    }

    out.push_str(&rule);
    out.push('\n');
    let summary = &comparison.summary;
    out.push_str(&format!("Batch Words: {}\n", summary.batch_word_count));
    out.push_str(&format!("Streaming Words: {}\n", summary.ws_word_count));
    out.push_str(&format!("Matched Words: {}\n", summary.matched));
    out.push_str(&format!(
        "Mismatched/Unaligned Words: {}\n",
        summary.mismatched
    ));
    out.push_str(&format!(
        "Words with significant drift (>{:.1}s): {}\n",
        config.drift_threshold_sec, summary.significant_drift_count
    ));
    out.push_str(&format!(
        "Final drift at end of audio: {:+.3}s\n",
        summary.final_drift
    ));

    out
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn word_cell(word: &str) -> String {
    let truncated: String = word.chars().take(WORD_COL_WIDTH - 1).collect();
    pad(&truncated, WORD_COL_WIDTH)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn median_sorted(sorted_values: &[f64]) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 0 {
        (sorted_values[mid - 1] + sorted_values[mid]) / 2.0
    } else {
        sorted_values[mid]
    }
}

fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted_values.len() - 1) as f64;
    let rank = clamped * max_index;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = rank - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

fn checked_f32(value: f64, metric_name: &str) -> Result<f32, DriftError> {
    if !value.is_finite() {
        return Err(DriftError::invalid_input(format!(
            "metric '{metric_name}' produced non-finite value: {value}"
        )));
    }
    Ok(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::differ::align;
    use crate::types::WordRecord;

    fn words(entries: &[(&str, f64)]) -> Vec<WordRecord> {
        entries
            .iter()
            .map(|(text, start)| WordRecord {
                text: text.to_string(),
                start: *start,
                end: start + 0.4,
            })
            .collect()
    }

    fn matched(start_diff: f64) -> MatchedWord {
        MatchedWord {
            word: "w".to_string(),
            index_a: 0,
            index_b: 0,
            batch_start: 0.0,
            batch_end: 0.4,
            ws_start: start_diff,
            ws_end: start_diff + 0.4,
            start_diff,
            end_diff: start_diff,
        }
    }

    #[test]
    fn drift_stats_none_without_matches() {
        assert!(compute_drift_stats(&[]).unwrap().is_none());
    }

    #[test]
    fn drift_stats_over_matches() {
        let matches: Vec<MatchedWord> =
            [-0.2, 0.0, 0.1, 0.3].iter().copied().map(matched).collect();
        let stats = compute_drift_stats(&matches).unwrap().unwrap();
        assert!((stats.mean - 0.05).abs() < 1e-6);
        assert!((stats.p50 - 0.05).abs() < 1e-6);
        assert!((stats.max_abs - 0.3).abs() < 1e-6);
        assert!(stats.p90 > stats.p50);
    }

    #[test]
    fn build_report_carries_summary_and_meta() {
        let a = words(&[("hello", 0.0), ("world", 0.5)]);
        let b = words(&[("hello", 0.2), ("world", 0.7)]);
        let comparison = align(&a, &b, &CompareConfig::default());
        let report = build_report(
            &comparison,
            Meta {
                generated_at: "2026-01-01T00:00:00Z".to_string(),
                batch_label: "batch.json".to_string(),
                ws_label: "ws.json".to_string(),
                max_search_distance: 3,
                drift_threshold_sec: 0.1,
            },
        )
        .unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.summary.matched, 2);
        assert!(report.drift_stats.is_some());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["events"][0]["kind"], "match");
        assert_eq!(json["summary"]["matched"], 2);
        assert_eq!(json["meta"]["batch_label"], "batch.json");
    }

    #[test]
    fn render_includes_event_markers_and_footer() {
        let a = words(&[("one", 0.0), ("skip", 0.5), ("two", 1.0)]);
        let b = words(&[("one", 0.0), ("uh", 0.3), ("two", 1.25)]);
        let comparison = align(&a, &b, &CompareConfig::default());
        let text = render_text(&comparison, &CompareConfig::default(), true);

        assert!(text.contains("Batch Idx"));
        assert!(text.contains("[skip->uh]"));
        assert!(text.contains("(substitution)"));
        assert!(text.contains("+0.250s"));
        assert!(text.contains("Matched Words: 2"));
        assert!(text.contains("Final drift at end of audio: +0.250s"));
    }

    #[test]
    fn render_marks_insertions_and_deletions() {
        let a = words(&[("a", 0.0), ("b", 0.5)]);
        let b = words(&[("a", 0.0), ("b", 0.5), ("extra", 1.0)]);
        let text = render_text(
            &align(&a, &b, &CompareConfig::default()),
            &CompareConfig::default(),
            true,
        );
        assert!(text.contains("[+extra]"));
        assert!(text.contains("(insertion)"));

        let text = render_text(
            &align(&b, &a, &CompareConfig::default()),
            &CompareConfig::default(),
            true,
        );
        assert!(text.contains("[-extra]"));
        assert!(text.contains("(deletion)"));
    }

    #[test]
    fn render_thins_quiet_middle_rows() {
        // 20 zero-drift matches: the thinned view shows the first five and
        // the last five indices, not the quiet middle.
        let entries: Vec<(String, f64)> = (0..20)
            .map(|n| (format!("word{n}"), n as f64 * 0.5))
            .collect();
        let refs: Vec<(&str, f64)> = entries
            .iter()
            .map(|(text, start)| (text.as_str(), *start))
            .collect();
        let a = words(&refs);
        let comparison = align(&a, &a, &CompareConfig::default());

        let thinned = render_text(&comparison, &CompareConfig::default(), false);
        assert!(thinned.contains("word0 "));
        assert!(thinned.contains("word19"));
        assert!(!thinned.contains("word9 "));

        let full = render_text(&comparison, &CompareConfig::default(), true);
        assert!(full.contains("word9 "));
    }

    #[test]
    fn render_always_shows_significant_drift_rows() {
        let a = words(&[
            ("w0", 0.0),
            ("w1", 0.5),
            ("w2", 1.0),
            ("w3", 1.5),
            ("w4", 2.0),
            ("w5", 2.5),
            ("w6", 3.0),
            ("w7", 3.5),
            ("w8", 4.0),
            ("w9", 4.5),
            ("w10", 5.0),
        ]);
        let mut b = a.clone();
        // Significant drift on an otherwise-hidden middle row.
        b[5].start += 0.5;
        b[5].end += 0.5;
        let comparison = align(&a, &b, &CompareConfig::default());
        let thinned = render_text(&comparison, &CompareConfig::default(), false);
        assert!(thinned.contains("+0.500s"));
    }
}
