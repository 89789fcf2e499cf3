//! Audio anomaly scoring.
//!
//! Converts raw per-chunk RMS loudness into a normalized spike score:
//! ratio to the corpus median, silence floor, then min-max normalization of
//! the non-silent ratios into [0, 1].

use tracing::debug;

use vodreel_models::Chunk;

use crate::config::AudioConfig;
use crate::error::{EngineError, EngineResult};

/// Substituted for the median when every chunk is exactly zero RMS.
const MEDIAN_EPSILON: f64 = 1e-9;

/// Score all chunks from their `audio_rms` field.
///
/// Writes `is_silent`, `audio_spike_ratio`, `is_volume_spike`, and
/// `audio_score` onto every chunk. An empty chunk set is fatal; a degenerate
/// set (all silent, or all non-silent ratios equal) scores 0 everywhere.
pub fn score_audio(chunks: &mut [Chunk], config: &AudioConfig) -> EngineResult<()> {
    if chunks.is_empty() {
        return Err(EngineError::NoChunks);
    }

    let median = median_rms(chunks);

    debug!(
        chunks = chunks.len(),
        median_rms = median,
        silence_floor = config.silence_rms_threshold,
        "Scoring audio spikes"
    );

    for chunk in chunks.iter_mut() {
        if chunk.audio_rms < config.silence_rms_threshold {
            chunk.is_silent = true;
            chunk.audio_spike_ratio = 0.0;
            chunk.is_volume_spike = false;
            continue;
        }

        chunk.is_silent = false;
        chunk.audio_spike_ratio = chunk.audio_rms / median;
        chunk.is_volume_spike = chunk.audio_spike_ratio >= config.spike_multiplier;
    }

    normalize_scores(chunks);

    let spikes = chunks.iter().filter(|c| c.is_volume_spike).count();
    debug!(spikes, "Audio scoring complete");

    Ok(())
}

/// Median RMS across all chunks, with an epsilon floor so the ratio never
/// divides by zero.
fn median_rms(chunks: &[Chunk]) -> f64 {
    let mut values: Vec<f64> = chunks.iter().map(|c| c.audio_rms).collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    if median == 0.0 {
        MEDIAN_EPSILON
    } else {
        median
    }
}

/// Min-max normalize spike ratios of non-silent chunks into [0, 1].
///
/// Silent chunks always score 0. If every non-silent ratio is equal the
/// spread is zero, so every chunk scores 0 rather than dividing by zero.
fn normalize_scores(chunks: &mut [Chunk]) {
    let ratios: Vec<f64> = chunks
        .iter()
        .filter(|c| !c.is_silent)
        .map(|c| c.audio_spike_ratio)
        .collect();

    let Some((min, max)) = min_max(&ratios) else {
        // All chunks silent
        for chunk in chunks.iter_mut() {
            chunk.audio_score = 0.0;
        }
        return;
    };

    for chunk in chunks.iter_mut() {
        if chunk.is_silent || max == min {
            chunk.audio_score = 0.0;
        } else {
            chunk.audio_score = (chunk.audio_spike_ratio - min) / (max - min);
        }
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(min, max), &v| {
        (min.min(v), max.max(v))
    }))
}
