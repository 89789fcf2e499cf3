//! Pipeline runtime settings.

use std::path::PathBuf;

/// Runtime settings for the pipeline binary.
///
/// These cover where a run's artifacts live and how the run behaves; scoring
/// parameters live in `EngineConfig` and come from the selected preset.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Run data directory (inputs plus derived artifacts).
    pub data_dir: PathBuf,
    /// Directory of saved presets.
    pub presets_dir: PathBuf,
    /// Preset name: built-in or saved.
    pub preset: String,
    /// Reuse completed derived artifacts instead of recomputing them.
    pub resume: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            presets_dir: PathBuf::from("./presets"),
            preset: "balanced".to_string(),
            resume: false,
        }
    }
}

impl PipelineSettings {
    /// Create settings from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("VODREEL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            presets_dir: std::env::var("VODREEL_PRESETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./presets")),
            preset: std::env::var("VODREEL_PRESET").unwrap_or_else(|_| "balanced".to_string()),
            resume: std::env::var("VODREEL_RESUME")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}
