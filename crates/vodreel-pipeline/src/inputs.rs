//! Input artifact loaders.
//!
//! Inputs are produced by the excluded upstream collaborators (segmentation,
//! loudness extraction, speech-to-text, chat download/normalization). Every
//! loader here treats an absent file as fatal; degenerate content (empty
//! lists, missing per-chunk entries) is tolerated and logged instead.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use vodreel_models::{ChatKeywords, ChatReplay, Chunk, HypeEmotes, KeywordConfig};

use crate::artifacts::{Artifact, ArtifactStore};
use crate::error::PipelineResult;

/// One loudness measurement from the loudness provider.
#[derive(Debug, Deserialize)]
pub struct LoudnessRecord {
    pub chunk_id: u32,
    pub rms: f64,
}

/// One chunk transcript from the speech-to-text provider.
#[derive(Debug, Deserialize)]
pub struct TranscriptRecord {
    pub chunk_id: u32,
    pub text: String,
}

/// Load the segmentation chunk listing, ordered by chunk id.
pub async fn load_chunks(store: &ArtifactStore) -> PipelineResult<Vec<Chunk>> {
    let mut chunks: Vec<Chunk> = store.read_json(Artifact::Chunks).await?;
    chunks.sort_by_key(|c| c.chunk_id);
    debug!(chunks = chunks.len(), "Chunk listing loaded");
    Ok(chunks)
}

/// Load per-chunk loudness and merge it onto the chunks.
///
/// A chunk without a loudness entry keeps RMS 0 and will score as silent.
pub async fn merge_loudness(store: &ArtifactStore, chunks: &mut [Chunk]) -> PipelineResult<()> {
    let records: Vec<LoudnessRecord> = store.read_json(Artifact::Loudness).await?;
    let by_id: BTreeMap<u32, f64> = records.iter().map(|r| (r.chunk_id, r.rms)).collect();

    for chunk in chunks.iter_mut() {
        match by_id.get(&chunk.chunk_id) {
            Some(&rms) => chunk.audio_rms = rms,
            None => warn!(chunk_id = chunk.chunk_id, "No loudness entry for chunk"),
        }
    }
    Ok(())
}

/// Load per-chunk transcripts and merge them onto the chunks.
pub async fn merge_transcripts(store: &ArtifactStore, chunks: &mut [Chunk]) -> PipelineResult<()> {
    let records: Vec<TranscriptRecord> = store.read_json(Artifact::Transcripts).await?;
    let mut by_id: BTreeMap<u32, String> =
        records.into_iter().map(|r| (r.chunk_id, r.text)).collect();

    let mut missing = 0usize;
    for chunk in chunks.iter_mut() {
        match by_id.remove(&chunk.chunk_id) {
            Some(text) => chunk.transcript = Some(text),
            None => missing += 1,
        }
    }
    if missing > 0 {
        warn!(missing, "Chunks without a transcript entry");
    }
    Ok(())
}

/// Load the normalized chat replay.
pub async fn load_chat_replay(store: &ArtifactStore) -> PipelineResult<ChatReplay> {
    let replay: ChatReplay = store.read_json(Artifact::ChatReplay).await?;
    debug!(messages = replay.messages.len(), "Chat replay loaded");
    Ok(replay)
}

/// Load the transcript keyword/sentiment configuration.
pub async fn load_keyword_config(store: &ArtifactStore) -> PipelineResult<KeywordConfig> {
    store.read_json(Artifact::Keywords).await
}

/// Load the chat keyword lists.
pub async fn load_chat_keywords(store: &ArtifactStore) -> PipelineResult<ChatKeywords> {
    store.read_json(Artifact::ChatKeywords).await
}

/// Load the hype emote lists.
pub async fn load_hype_emotes(store: &ArtifactStore) -> PipelineResult<HypeEmotes> {
    store.read_json(Artifact::HypeEmotes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::fs;

    async fn seed(store: &ArtifactStore, artifact: Artifact, value: serde_json::Value) {
        let path = store.path(artifact);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, serde_json::to_vec(&value).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_chunks_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        seed(
            &store,
            Artifact::Chunks,
            json!([
                {"chunk_id": 2, "file": "chunk_0002.mp4", "start_time": 90.0, "end_time": 135.0},
                {"chunk_id": 0, "file": "chunk_0000.mp4", "start_time": 0.0, "end_time": 45.0},
            ]),
        )
        .await;

        let chunks = load_chunks(&store).await.unwrap();
        assert_eq!(chunks[0].chunk_id, 0);
        assert_eq!(chunks[1].chunk_id, 2);
        assert_eq!(chunks[1].audio_rms, 0.0);
    }

    #[tokio::test]
    async fn test_loudness_merges_and_tolerates_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        seed(
            &store,
            Artifact::Loudness,
            json!([{"chunk_id": 0, "rms": 0.25}]),
        )
        .await;

        let mut chunks = vec![
            Chunk::new(0, "chunk_0000.mp4", 0.0, 45.0),
            Chunk::new(1, "chunk_0001.mp4", 45.0, 90.0),
        ];
        merge_loudness(&store, &mut chunks).await.unwrap();

        assert_eq!(chunks[0].audio_rms, 0.25);
        assert_eq!(chunks[1].audio_rms, 0.0);
    }

    #[tokio::test]
    async fn test_missing_transcripts_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let mut chunks = vec![Chunk::new(0, "chunk_0000.mp4", 0.0, 45.0)];
        let err = merge_transcripts(&store, &mut chunks).await.unwrap_err();
        assert!(err.is_missing_input());
    }
}
