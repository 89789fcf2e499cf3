//! Derived-state reset for non-resume runs.

use tokio::fs;
use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::error::PipelineResult;

/// Delete every derived artifact directory, leaving inputs and presets
/// untouched. Resumed runs skip this entirely.
pub async fn reset_derived_state(store: &ArtifactStore) -> PipelineResult<()> {
    for dir in store.derived_dirs() {
        match fs::remove_dir_all(&dir).await {
            Ok(()) => info!(dir = %dir.display(), "Derived artifacts removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{Artifact, ArtifactState};

    #[tokio::test]
    async fn test_reset_removes_derived_keeps_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let input_path = store.path(Artifact::Chunks);
        fs::create_dir_all(input_path.parent().unwrap()).await.unwrap();
        fs::write(&input_path, b"[]").await.unwrap();
        store
            .write_json(Artifact::ChatSpikes, &Vec::<u32>::new())
            .await
            .unwrap();

        reset_derived_state(&store).await.unwrap();

        assert_eq!(store.state(Artifact::Chunks), ArtifactState::Completed);
        assert_eq!(store.state(Artifact::ChatSpikes), ArtifactState::Pending);
    }

    #[tokio::test]
    async fn test_reset_on_fresh_dir_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        reset_derived_state(&store).await.unwrap();
    }
}
