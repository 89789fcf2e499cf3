//! Versioned highlight timeline artifact.
//!
//! The final timeline is written as a wrapped object with a schema version.
//! Version 1 was a bare interval list without edit metadata; loading one
//! upgrades it in place so older runs stay readable.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::interval::HighlightInterval;

/// Current timeline schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// Errors from reading a timeline artifact.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("unsupported timeline format")]
    UnsupportedFormat,

    #[error("malformed timeline entry: {0}")]
    MalformedEntry(#[from] serde_json::Error),
}

/// The final timeline artifact handed to clip extraction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Timeline {
    pub schema_version: u32,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
    pub timeline: Vec<HighlightInterval>,
}

impl Timeline {
    /// An empty timeline at the current schema version.
    pub fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            timeline: Vec::new(),
        }
    }

    /// Wrap an interval list at the current schema version.
    pub fn new(timeline: Vec<HighlightInterval>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            timeline,
        }
    }

    /// Parse a timeline artifact from raw JSON, upgrading v1 where needed.
    ///
    /// Accepted shapes:
    /// - v2 wrapped object with the current `schema_version`
    /// - v1 bare list of `{start_time, end_time, chunk_ids}` entries
    /// - an unversioned `{timeline: [...]}` object, treated like v1 entries
    pub fn from_value(value: Value) -> Result<Self, TimelineError> {
        match value {
            Value::Array(entries) => upgrade_v1_entries(entries),
            Value::Object(ref obj) => {
                if obj.get("schema_version").and_then(Value::as_u64) == Some(SCHEMA_VERSION as u64)
                {
                    Ok(serde_json::from_value(value)?)
                } else if let Some(Value::Array(entries)) = obj.get("timeline") {
                    upgrade_v1_entries(entries.clone())
                } else {
                    Err(TimelineError::UnsupportedFormat)
                }
            }
            _ => Err(TimelineError::UnsupportedFormat),
        }
    }
}

/// V1 timeline entry: bare time range plus member chunks.
#[derive(Debug, Deserialize)]
struct V1Entry {
    start_time: f64,
    end_time: f64,
    #[serde(default)]
    chunk_ids: Vec<u32>,
}

fn upgrade_v1_entries(entries: Vec<Value>) -> Result<Timeline, TimelineError> {
    let mut timeline = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.into_iter().enumerate() {
        let v1: V1Entry = serde_json::from_value(entry)?;
        timeline.push(HighlightInterval::new(
            idx,
            v1.start_time,
            v1.end_time,
            v1.chunk_ids,
        ));
    }

    Ok(Timeline::new(timeline))
}
