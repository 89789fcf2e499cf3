//! Highlight interval model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A merged highlight time range selected for extraction.
///
/// Created by the segment merger from contiguous flagged chunks, padded by
/// the buffer expander, and filtered (never mutated) by the duration filter.
/// The interval list is the sole authority for downstream clip extraction;
/// chunks are only kept around via `chunk_ids` for provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightInterval {
    /// Stable identifier (`hl_0007` style).
    pub id: String,

    /// Start time in seconds.
    pub start_time: f64,

    /// End time in seconds. May exceed the source duration after buffering;
    /// clamping is the clip extractor's concern.
    pub end_time: f64,

    /// Member chunk ids, in merge order.
    pub chunk_ids: Vec<u32>,

    /// Whether the interval is enabled for extraction (manual review flag).
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Manual trim applied to the start, in seconds.
    #[serde(default)]
    pub trim_start_offset: f64,

    /// Manual trim applied to the end, in seconds.
    #[serde(default)]
    pub trim_end_offset: f64,

    /// Position within the final timeline.
    pub order_index: usize,

    /// Post-buffer duration in seconds, attached by the duration filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

fn default_enabled() -> bool {
    true
}

impl HighlightInterval {
    /// Create an interval with default edit metadata.
    pub fn new(order_index: usize, start_time: f64, end_time: f64, chunk_ids: Vec<u32>) -> Self {
        Self {
            id: format!("hl_{order_index:04}"),
            start_time,
            end_time,
            chunk_ids,
            enabled: true,
            trim_start_offset: 0.0,
            trim_end_offset: 0.0,
            order_index,
            duration: None,
        }
    }

    /// Current duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}
