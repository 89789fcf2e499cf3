//! Chat activity spike detection.

use tracing::{debug, info};

use vodreel_models::{BaselineSample, SpikeSample};

use crate::config::ChatConfig;

/// Detect seconds whose message count spikes over the rolling baseline.
///
/// A second is a spike when `count / baseline >= spike_ratio_threshold` AND
/// `baseline >= min_baseline`. The baseline floor prevents near-zero
/// baselines from amplifying single stray messages into huge ratios.
pub fn detect_spikes(baseline: &[BaselineSample], config: &ChatConfig) -> Vec<SpikeSample> {
    debug!(
        ratio_threshold = config.spike_ratio_threshold,
        min_baseline = config.min_baseline,
        "Detecting chat spikes"
    );

    let mut spikes = Vec::new();

    for sample in baseline {
        if sample.baseline < config.min_baseline {
            continue;
        }

        let ratio = sample.messages as f64 / sample.baseline;

        if ratio >= config.spike_ratio_threshold {
            spikes.push(SpikeSample {
                second: sample.second,
                magnitude: ratio,
                messages: sample.messages,
                baseline: sample.baseline,
            });
        }
    }

    debug!(spikes = spikes.len(), "Chat spike detection complete");

    spikes
}

/// Log high-level chat activity diagnostics for tuning.
pub fn log_chat_metrics_summary(baseline: &[BaselineSample], spikes: &[SpikeSample]) {
    let max_mps = baseline.iter().map(|s| s.messages).max().unwrap_or(0);

    let active: Vec<u32> = baseline
        .iter()
        .map(|s| s.messages)
        .filter(|&m| m > 0)
        .collect();
    let avg_mps = active.iter().sum::<u32>() as f64 / active.len().max(1) as f64;

    let baselines: Vec<f64> = baseline
        .iter()
        .map(|s| s.baseline)
        .filter(|&b| b > 0.0)
        .collect();
    let max_baseline = baselines.iter().fold(0.0_f64, |a, &b| a.max(b));
    let avg_baseline = baselines.iter().sum::<f64>() / baselines.len().max(1) as f64;

    let max_magnitude = spikes.iter().fold(0.0_f64, |a, s| a.max(s.magnitude));

    info!(
        max_mps,
        avg_mps = format!("{avg_mps:.3}"),
        max_baseline = format!("{max_baseline:.3}"),
        avg_baseline = format!("{avg_baseline:.3}"),
        spike_count = spikes.len(),
        max_spike_magnitude = format!("{max_magnitude:.2}"),
        "Chat metrics summary"
    );
}
