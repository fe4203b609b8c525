use crate::types::NormalizedWord;

/// Find the nearest index pair at or ahead of `(i, j)` whose keys match, to
/// resynchronize the two sequences after an insertion, deletion, or
/// substitution.
///
/// Candidates are grouped by Chebyshev distance `max(di, dj)` and scanned for
/// `distance` 1 through `max_distance`. Within one ring the diagonal candidate
/// `(i+d, j+d)` is checked first (the common case when both transcripts skip in
/// step), then the remaining ring positions with `di` ascending and, per `di`,
/// `dj` ascending. The first in-bounds key match wins, which makes the result
/// deterministic and biased toward the smallest adjustment.
///
/// Only forward offsets are searched: both transcripts are produced
/// monotonically, so divergences are modeled as local insertions, deletions,
/// or substitutions, never reorderings. `None` past `max_distance` signals an
/// unresolved divergence to the caller.
pub fn find_matching_index(
    words_a: &[NormalizedWord],
    words_b: &[NormalizedWord],
    i: usize,
    j: usize,
    max_distance: usize,
) -> Option<(usize, usize)> {
    if i >= words_a.len() || j >= words_b.len() {
        return None;
    }

    // Distance 0: already aligned. Callers normally only search on a mismatch.
    if words_a[i].key == words_b[j].key {
        return Some((i, j));
    }

    for distance in 1..=max_distance {
        let gi = i + distance;
        let gj = j + distance;
        if gi < words_a.len() && gj < words_b.len() && words_a[gi].key == words_b[gj].key {
            return Some((gi, gj));
        }

        for di in 0..=distance {
            for dj in 0..=distance {
                if di.max(dj) != distance {
                    continue;
                }
                if di == distance && dj == distance {
                    // Diagonal already checked above.
                    continue;
                }

                let gi = i + di;
                let gj = j + dj;
                if gi < words_a.len() && gj < words_b.len() && words_a[gi].key == words_b[gj].key {
                    return Some((gi, gj));
                }
            }
        }
    }

    None
}

/// How a resolved divergence advances the cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Extra words on the streaming side only; cursor B jumps to `until_b`.
    InsertionRun { until_b: usize },
    /// Extra words on the batch side only; cursor A jumps to `until_a`.
    DeletionRun { until_a: usize },
    /// Both cursors advance: a substitution block, possibly with a surplus on
    /// one side.
    Block { until_a: usize, until_b: usize },
}

/// Classify the outcome of a successful search relative to the cursors it
/// started from. Separated from the search so both halves test independently.
pub(crate) fn classify_resolution(
    i: usize,
    j: usize,
    found_a: usize,
    found_b: usize,
) -> Resolution {
    // The search is only invoked on a key mismatch, so distance 0 cannot have
    // matched and at least one cursor must move.
    debug_assert!(
        found_a > i || found_b > j,
        "resolution must advance at least one cursor"
    );

    if found_a == i {
        Resolution::InsertionRun { until_b: found_b }
    } else if found_b == j {
        Resolution::DeletionRun { until_a: found_a }
    } else {
        Resolution::Block {
            until_a: found_a,
            until_b: found_b,
        }
    }
}
