//! Artifact store with file-existence memoization and atomic writes.
//!
//! Every input and derived artifact of a run has a fixed relative path under
//! the run's data directory. Resume logic is deliberately coarse: an artifact
//! is `Completed` exactly when its file exists. To keep that sound across
//! crashes, every write lands in a temp file in the destination directory and
//! is renamed into place, so a half-written artifact can never be mistaken
//! for a completed one.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

/// Resume state of one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    /// The artifact file exists; a resumed run may reuse it.
    Completed,
    /// The artifact has not been produced yet.
    Pending,
}

/// Every artifact the pipeline reads or writes, keyed by a stable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    // Inputs, produced by the excluded upstream collaborators.
    Chunks,
    Loudness,
    Transcripts,
    ChatReplay,
    Keywords,
    ChatKeywords,
    HypeEmotes,

    // Derived chat metrics, one file per sub-stage.
    MessagesPerSecond,
    RollingBaseline,
    ChatSpikes,
    EmoteDensity,
    RepeatedEmotes,
    EmoteScores,
    KeywordHits,
    KeywordScores,
    ChatScore,
    ChatScoreSmoothed,
    ChatScoresAligned,

    // Derived chunk scores.
    ScoredChunks,
    ScoreLog,

    // Derived timelines.
    HighlightTimeline,
    BufferedTimeline,
    FinalTimeline,
}

impl Artifact {
    /// Path relative to the run's data directory.
    pub fn relative_path(&self) -> &'static str {
        match self {
            Artifact::Chunks => "inputs/chunks.json",
            Artifact::Loudness => "inputs/loudness.json",
            Artifact::Transcripts => "inputs/transcripts.json",
            Artifact::ChatReplay => "inputs/chat_messages.json",
            Artifact::Keywords => "inputs/keywords.json",
            Artifact::ChatKeywords => "inputs/chat_keywords.json",
            Artifact::HypeEmotes => "inputs/hype_emotes.json",

            Artifact::MessagesPerSecond => "chat_metrics/messages_per_second.json",
            Artifact::RollingBaseline => "chat_metrics/rolling_baseline.json",
            Artifact::ChatSpikes => "chat_metrics/chat_spikes.json",
            Artifact::EmoteDensity => "chat_metrics/emote_density.json",
            Artifact::RepeatedEmotes => "chat_metrics/repeated_emotes.json",
            Artifact::EmoteScores => "chat_metrics/emote_scores.json",
            Artifact::KeywordHits => "chat_metrics/keyword_hits.json",
            Artifact::KeywordScores => "chat_metrics/keyword_scores.json",
            Artifact::ChatScore => "chat_metrics/chat_score.json",
            Artifact::ChatScoreSmoothed => "chat_metrics/chat_score_smoothed.json",
            Artifact::ChatScoresAligned => "chat_metrics/chat_scores_aligned.json",

            Artifact::ScoredChunks => "scores/scored_chunks.json",
            Artifact::ScoreLog => "scores/score_log.json",

            Artifact::HighlightTimeline => "timelines/highlight_timeline.json",
            Artifact::BufferedTimeline => "timelines/highlight_timeline_buffered.json",
            Artifact::FinalTimeline => "timelines/highlight_timeline_final.json",
        }
    }

    /// Whether the artifact is a run input rather than derived state.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Artifact::Chunks
                | Artifact::Loudness
                | Artifact::Transcripts
                | Artifact::ChatReplay
                | Artifact::Keywords
                | Artifact::ChatKeywords
                | Artifact::HypeEmotes
        )
    }
}

/// Filesystem layout of one run's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of an artifact.
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.relative_path())
    }

    /// Subdirectories holding derived state, deleted by a non-resume run.
    pub fn derived_dirs(&self) -> Vec<PathBuf> {
        ["chat_metrics", "scores", "timelines"]
            .iter()
            .map(|d| self.root.join(d))
            .collect()
    }

    /// Resume state by file existence.
    pub fn state(&self, artifact: Artifact) -> ArtifactState {
        if self.path(artifact).exists() {
            ArtifactState::Completed
        } else {
            ArtifactState::Pending
        }
    }

    /// Read a JSON artifact. A missing input artifact is a fatal
    /// missing-input error; a missing derived artifact is a plain IO error
    /// since callers check `state` before reading derived files.
    pub async fn read_json<T: DeserializeOwned>(&self, artifact: Artifact) -> PipelineResult<T> {
        let path = self.path(artifact);
        if artifact.is_input() && !path.exists() {
            return Err(PipelineError::missing_input(path));
        }

        let bytes = fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write a JSON artifact atomically: temp file in the destination
    /// directory, then rename.
    pub async fn write_json<T: Serialize>(
        &self,
        artifact: Artifact,
        value: &T,
    ) -> PipelineResult<()> {
        let path = self.path(artifact);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "Artifact written");
        Ok(())
    }
}
