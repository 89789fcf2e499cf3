//! Interval buffering.

use tracing::debug;

use vodreel_models::HighlightInterval;

use crate::config::SegmentConfig;

/// Pad each interval with lead-in and tail context.
///
/// The start is shifted back by `pre_buffer_secs` and clamped at zero;
/// the end is extended by `post_buffer_secs` without clamping, since the
/// source duration is unknown here and the clip extractor clamps reads to
/// the file anyway. Buffered intervals may overlap neighbors; that is
/// accepted rather than re-merged so interval identity stays stable.
pub fn apply_buffers(intervals: &mut [HighlightInterval], config: &SegmentConfig) {
    for interval in intervals.iter_mut() {
        interval.start_time = (interval.start_time - config.pre_buffer_secs).max(0.0);
        interval.end_time += config.post_buffer_secs;
    }

    debug!(
        intervals = intervals.len(),
        pre_buffer_secs = config.pre_buffer_secs,
        post_buffer_secs = config.post_buffer_secs,
        "Buffers applied"
    );
}
