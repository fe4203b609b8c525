use crate::alignment::normalize::normalize_words;
use crate::alignment::search::{classify_resolution, find_matching_index, Resolution};
use crate::config::CompareConfig;
use crate::types::{AlignmentEvent, Comparison, MatchedWord, NormalizedWord, Summary, WordRecord};

/// Walk the batch ("A") and streaming ("B") sequences in parallel, emitting one
/// event per position and accumulating the drift summary. Runs once, post hoc,
/// on two complete sequences; an unresolved divergence stops the walk with
/// everything past it unprocessed.
pub fn align(batch: &[WordRecord], ws: &[WordRecord], config: &CompareConfig) -> Comparison {
    let normalized_batch = normalize_words(batch);
    let normalized_ws = normalize_words(ws);
    align_normalized(batch, &normalized_batch, ws, &normalized_ws, config)
}

/// Alignment over pre-normalized sequences. `normalized_batch` / `normalized_ws`
/// must be index-parallel with their raw counterparts (the normalizer contract).
pub fn align_normalized(
    batch: &[WordRecord],
    normalized_batch: &[NormalizedWord],
    ws: &[WordRecord],
    normalized_ws: &[NormalizedWord],
    config: &CompareConfig,
) -> Comparison {
    debug_assert_eq!(
        batch.len(),
        normalized_batch.len(),
        "normalizer contract violated for batch sequence"
    );
    debug_assert_eq!(
        ws.len(),
        normalized_ws.len(),
        "normalizer contract violated for streaming sequence"
    );

    let mut events = Vec::new();
    let mut summary = Summary {
        batch_word_count: batch.len(),
        ws_word_count: ws.len(),
        ..Summary::default()
    };

    let mut i = 0usize;
    let mut j = 0usize;

    while i < batch.len() || j < ws.len() {
        if i >= batch.len() {
            push_insertion(&mut events, &mut summary, ws, j);
            j += 1;
            continue;
        }
        if j >= ws.len() {
            push_deletion(&mut events, &mut summary, batch, i);
            i += 1;
            continue;
        }

        if normalized_batch[i].key == normalized_ws[j].key {
            let matched = MatchedWord {
                word: batch[i].text.clone(),
                index_a: i,
                index_b: j,
                batch_start: batch[i].start,
                batch_end: batch[i].end,
                ws_start: ws[j].start,
                ws_end: ws[j].end,
                start_diff: ws[j].start - batch[i].start,
                end_diff: ws[j].end - batch[i].end,
            };
            if matched.start_diff.abs() > config.drift_threshold_sec {
                summary.significant_drift_count += 1;
            }
            summary.final_drift = matched.start_diff;
            summary.matched += 1;
            summary.matches.push(matched.clone());
            events.push(AlignmentEvent::Match(matched));
            i += 1;
            j += 1;
            continue;
        }

        let Some((found_a, found_b)) = find_matching_index(
            normalized_batch,
            normalized_ws,
            i,
            j,
            config.max_search_distance,
        ) else {
            tracing::warn!(
                index_a = i,
                index_b = j,
                max_search_distance = config.max_search_distance,
                "divergence unresolved within search bound, stopping alignment"
            );
            events.push(AlignmentEvent::Unresolved {
                index_a: i,
                index_b: j,
            });
            summary.mismatched += 1;
            break;
        };

        match classify_resolution(i, j, found_a, found_b) {
            Resolution::InsertionRun { until_b } => {
                for k in j..until_b {
                    push_insertion(&mut events, &mut summary, ws, k);
                }
                j = until_b;
            }
            Resolution::DeletionRun { until_a } => {
                for k in i..until_a {
                    push_deletion(&mut events, &mut summary, batch, k);
                }
                i = until_a;
            }
            Resolution::Block { until_a, until_b } => {
                let num_a = until_a - i;
                let num_b = until_b - j;
                let paired = num_a.min(num_b);
                for k in 0..paired {
                    events.push(AlignmentEvent::Substitution {
                        index_a: i + k,
                        index_b: j + k,
                        word_a: batch[i + k].text.clone(),
                        word_b: ws[j + k].text.clone(),
                        batch_start: batch[i + k].start,
                        ws_start: ws[j + k].start,
                    });
                    summary.mismatched += 1;
                }
                for k in paired..num_a {
                    push_deletion(&mut events, &mut summary, batch, i + k);
                }
                for k in paired..num_b {
                    push_insertion(&mut events, &mut summary, ws, j + k);
                }
                i = until_a;
                j = until_b;
            }
        }
        // The resolved pair itself is not emitted here; the next loop
        // iteration sees equal keys at (i, j) and emits the match.
    }

    Comparison { events, summary }
}

fn push_insertion(
    events: &mut Vec<AlignmentEvent>,
    summary: &mut Summary,
    ws: &[WordRecord],
    index_b: usize,
) {
    events.push(AlignmentEvent::Insertion {
        index_b,
        word: ws[index_b].text.clone(),
        ws_start: ws[index_b].start,
    });
    summary.mismatched += 1;
}

fn push_deletion(
    events: &mut Vec<AlignmentEvent>,
    summary: &mut Summary,
    batch: &[WordRecord],
    index_a: usize,
) {
    events.push(AlignmentEvent::Deletion {
        index_a,
        word: batch[index_a].text.clone(),
        batch_start: batch[index_a].start,
    });
    summary.mismatched += 1;
}
