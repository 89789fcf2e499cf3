//! Adjacent-highlight merging.

use tracing::debug;

use vodreel_models::{Chunk, HighlightInterval};

use crate::config::SegmentConfig;

/// Collapse consecutive flagged chunks into highlight intervals.
///
/// Greedy forward scan with a gap tolerance: a highlight chunk joins the
/// current interval when its start time is within `merge_gap_secs` of the
/// interval's end, which absorbs short non-highlight gaps between nearby
/// highlights. The input order is a precondition, not an assumption — the
/// surviving highlights are sorted by start time before scanning. An empty
/// highlight set yields an empty interval list.
pub fn merge_adjacent_highlights(chunks: &[Chunk], config: &SegmentConfig) -> Vec<HighlightInterval> {
    let mut highlights: Vec<&Chunk> = chunks.iter().filter(|c| c.is_highlight()).collect();
    highlights.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let Some(first) = highlights.first() else {
        return Vec::new();
    };

    let mut merged: Vec<HighlightInterval> = Vec::new();
    let mut start_time = first.start_time;
    let mut end_time = first.end_time;
    let mut chunk_ids = vec![first.chunk_id];

    for chunk in &highlights[1..] {
        if chunk.start_time <= end_time + config.merge_gap_secs {
            // Max, not assignment: overlapping chunks can end out of order
            end_time = end_time.max(chunk.end_time);
            chunk_ids.push(chunk.chunk_id);
        } else {
            let order_index = merged.len();
            merged.push(HighlightInterval::new(
                order_index,
                start_time,
                end_time,
                std::mem::take(&mut chunk_ids),
            ));

            start_time = chunk.start_time;
            end_time = chunk.end_time;
            chunk_ids.push(chunk.chunk_id);
        }
    }

    let order_index = merged.len();
    merged.push(HighlightInterval::new(
        order_index, start_time, end_time, chunk_ids,
    ));

    debug!(
        highlights = highlights.len(),
        intervals = merged.len(),
        "Adjacent highlights merged"
    );

    merged
}
