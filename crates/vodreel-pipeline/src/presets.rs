//! Named engine configuration presets.
//!
//! A preset is a full `EngineConfig` saved as JSON under the presets
//! directory. Built-in names resolve without touching disk; anything else is
//! looked up as `<presets_dir>/<name>.json`. Loading always returns a fresh
//! owned config, so switching presets between runs cannot affect a run
//! already in flight.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use vodreel_engine::EngineConfig;

use crate::error::{PipelineError, PipelineResult};

/// Built-in preset, if the name matches one.
pub fn builtin(name: &str) -> Option<EngineConfig> {
    match name {
        "balanced" => Some(EngineConfig::balanced()),
        "chat_heavy" => Some(EngineConfig::chat_heavy()),
        "strict" => Some(EngineConfig::strict()),
        _ => None,
    }
}

fn preset_path(presets_dir: &Path, name: &str) -> PathBuf {
    presets_dir.join(format!("{name}.json"))
}

/// Resolve a preset name: built-ins first, then saved presets on disk.
pub async fn resolve(presets_dir: &Path, name: &str) -> PipelineResult<EngineConfig> {
    if let Some(config) = builtin(name) {
        return Ok(config);
    }

    let path = preset_path(presets_dir, name);
    if !path.exists() {
        return Err(PipelineError::UnknownPreset(name.to_string()));
    }

    let bytes = fs::read(&path).await?;
    let config: EngineConfig = serde_json::from_slice(&bytes)?;
    info!(preset = name, path = %path.display(), "Preset loaded");
    Ok(config)
}

/// Save a config as a named preset, atomically.
pub async fn save(presets_dir: &Path, name: &str, config: &EngineConfig) -> PipelineResult<()> {
    fs::create_dir_all(presets_dir).await?;

    let path = preset_path(presets_dir, name);
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(config)?).await?;
    fs::rename(&tmp, &path).await?;

    info!(preset = name, path = %path.display(), "Preset saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_resolves_without_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve(dir.path(), "strict").await.unwrap();
        assert!(!config.chat.enable_chat_only_highlights);
    }

    #[tokio::test]
    async fn test_save_then_resolve_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let custom = EngineConfig::balanced().with_highlight_threshold(0.8);
        save(dir.path(), "late_night", &custom).await.unwrap();

        let loaded = resolve(dir.path(), "late_night").await.unwrap();
        assert!((loaded.highlight_threshold - 0.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_preset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve(dir.path(), "nope").await.unwrap_err();
        assert!(matches!(err, PipelineError::UnknownPreset(_)));
    }
}
