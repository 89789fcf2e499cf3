//! Stage orchestration for one highlight run.
//!
//! Stages run strictly sequentially over an owned chunk list; each stage
//! fully consumes its input and writes its artifact before the next begins.
//! Resume works at whole-artifact granularity: a derived artifact that
//! already exists is read back instead of recomputed. In-memory chunk
//! scoring is cheap and always recomputed; only the persisted artifacts
//! participate in memoization.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use vodreel_engine::{
    align_to_video, apply_buffers, apply_chat_boost, apply_phase1_scores, combine_chat_scores,
    detect_spikes, emote_density, emote_scores, filter_false_positives, filter_short_intervals,
    flag_highlights, keyword_hits, keyword_scores, log_chat_metrics_summary,
    merge_adjacent_highlights, messages_per_second, repeated_emotes, rolling_baseline, score_audio,
    score_text, smooth_chat_scores, EngineConfig,
};
use vodreel_models::{AlignedChatSample, ChatReplay, Chunk, MpsSample, Timeline};

use crate::artifacts::{Artifact, ArtifactState, ArtifactStore};
use crate::error::{PipelineError, PipelineResult};
use crate::inputs;
use crate::logging::RunLogger;
use crate::progress::{ProgressObserver, TracingProgress};
use crate::score_log::build_score_log;

/// Runs the scoring and segmentation stages over one recording's artifacts.
pub struct HighlightRunner {
    store: ArtifactStore,
    config: EngineConfig,
    resume: bool,
    run_id: Uuid,
    observer: Box<dyn ProgressObserver>,
}

impl HighlightRunner {
    pub fn new(store: ArtifactStore, config: EngineConfig, resume: bool) -> Self {
        Self {
            store,
            config,
            resume,
            run_id: Uuid::new_v4(),
            observer: Box::new(TracingProgress),
        }
    }

    /// Replace the default tracing-backed progress observer.
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Execute the full run and return the final timeline.
    pub async fn run(&self) -> PipelineResult<Timeline> {
        let logger = RunLogger::new(self.run_id, "load_inputs");
        logger.log_start("loading run inputs");

        let mut chunks = inputs::load_chunks(&self.store).await?;
        if chunks.is_empty() {
            return Err(PipelineError::stage_failed(
                "load_inputs",
                "chunk listing is empty",
            ));
        }
        inputs::merge_loudness(&self.store, &mut chunks).await?;
        inputs::merge_transcripts(&self.store, &mut chunks).await?;
        let replay = inputs::load_chat_replay(&self.store).await?;
        let keywords = inputs::load_keyword_config(&self.store).await?;
        let chat_keywords = inputs::load_chat_keywords(&self.store).await?.flattened();
        let hype_emotes = inputs::load_hype_emotes(&self.store).await?.flattened();
        logger.log_completion(&format!(
            "{} chunks, {} chat messages",
            chunks.len(),
            replay.messages.len()
        ));
        self.observer.stage_completed(1, "load_inputs");

        let logger = logger.for_stage("audio_scoring");
        logger.log_start("scoring audio loudness");
        score_audio(&mut chunks, &self.config.audio)?;
        logger.log_completion(&format!(
            "{} volume spikes",
            chunks.iter().filter(|c| c.is_volume_spike).count()
        ));
        self.observer.stage_completed(2, "audio_scoring");

        let logger = logger.for_stage("text_scoring");
        logger.log_start("scoring transcripts");
        score_text(&mut chunks, &keywords)?;
        self.observer.stage_completed(3, "text_scoring");

        let logger = logger.for_stage("chat_metrics");
        logger.log_start("computing chat signal timeline");
        let video_duration_secs = chunks
            .last()
            .map(|c| c.end_time.ceil() as i64)
            .unwrap_or(0);
        let (mps, aligned) = self
            .chat_metrics(&replay, &chat_keywords, &hype_emotes, video_duration_secs)
            .await?;
        logger.log_completion(&format!("{} aligned chat samples", aligned.len()));
        self.observer.stage_completed(4, "chat_metrics");

        let logger = logger.for_stage("aggregation");
        logger.log_start("aggregating scores");
        apply_phase1_scores(&mut chunks, &self.config)?;
        apply_chat_boost(&mut chunks, &mps, &aligned, &self.config);
        self.observer.stage_completed(5, "aggregation");

        let logger = logger.for_stage("flagging");
        logger.log_start("flagging highlights");
        let flagged = flag_highlights(&mut chunks, &self.config);
        let downgraded = filter_false_positives(&mut chunks, &self.config);
        self.store.write_json(Artifact::ScoredChunks, &chunks).await?;
        self.store
            .write_json(Artifact::ScoreLog, &build_score_log(&chunks))
            .await?;
        logger.log_completion(&format!("{flagged} flagged, {downgraded} downgraded"));
        self.observer.stage_completed(6, "flagging");

        let logger = logger.for_stage("segmentation");
        logger.log_start("building highlight timeline");
        let segment = &self.config.segment;

        let merged = self
            .memoized(Artifact::HighlightTimeline, || {
                Timeline::new(merge_adjacent_highlights(&chunks, segment))
            })
            .await?;
        let buffered = self
            .memoized(Artifact::BufferedTimeline, || {
                let mut intervals = merged.timeline.clone();
                apply_buffers(&mut intervals, segment);
                Timeline::new(intervals)
            })
            .await?;
        let timeline = self
            .memoized(Artifact::FinalTimeline, || {
                Timeline::new(filter_short_intervals(buffered.timeline.clone(), segment))
            })
            .await?;
        logger.log_completion(&format!("{} intervals", timeline.timeline.len()));
        self.observer.stage_completed(7, "segmentation");

        Ok(timeline)
    }

    /// Run the chat signal chain, persisting every sub-stage artifact.
    async fn chat_metrics(
        &self,
        replay: &ChatReplay,
        chat_keywords: &std::collections::BTreeSet<String>,
        hype_emotes: &std::collections::BTreeSet<String>,
        video_duration_secs: i64,
    ) -> PipelineResult<(Vec<MpsSample>, Vec<AlignedChatSample>)> {
        let chat = &self.config.chat;

        let mps = self
            .memoized(Artifact::MessagesPerSecond, || {
                messages_per_second(&replay.messages)
            })
            .await?;
        let baseline = self
            .memoized(Artifact::RollingBaseline, || {
                rolling_baseline(&mps, chat.baseline_window_secs)
            })
            .await?;
        let spikes = self
            .memoized(Artifact::ChatSpikes, || detect_spikes(&baseline, chat))
            .await?;
        log_chat_metrics_summary(&baseline, &spikes);

        let density = self
            .memoized(Artifact::EmoteDensity, || emote_density(&replay.messages))
            .await?;
        let repeats = self
            .memoized(Artifact::RepeatedEmotes, || {
                repeated_emotes(&replay.messages)
            })
            .await?;
        let emotes = self
            .memoized(Artifact::EmoteScores, || {
                emote_scores(&density, &repeats, hype_emotes, chat.emote_score_scale)
            })
            .await?;

        let hits = self
            .memoized(Artifact::KeywordHits, || {
                keyword_hits(&replay.messages, chat_keywords)
            })
            .await?;
        let keyword_timeline = self
            .memoized(Artifact::KeywordScores, || {
                keyword_scores(&hits, chat.keyword_score_scale)
            })
            .await?;

        let combined = self
            .memoized(Artifact::ChatScore, || {
                combine_chat_scores(&spikes, &emotes, &keyword_timeline, chat)
            })
            .await?;
        let smoothed = self
            .memoized(Artifact::ChatScoreSmoothed, || {
                smooth_chat_scores(&combined, chat.smoothing_window_secs)
            })
            .await?;
        let aligned = self
            .memoized(Artifact::ChatScoresAligned, || {
                align_to_video(&smoothed, chat.chat_to_video_offset_secs, video_duration_secs)
            })
            .await?;

        Ok((mps, aligned))
    }

    /// Compute and persist an artifact, or read it back when resuming and it
    /// already exists.
    async fn memoized<T, F>(&self, artifact: Artifact, compute: F) -> PipelineResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if self.resume && self.store.state(artifact) == ArtifactState::Completed {
            debug!(artifact = artifact.relative_path(), "Reusing completed artifact");
            return self.store.read_json(artifact).await;
        }

        let value = compute();
        self.store.write_json(artifact, &value).await?;
        Ok(value)
    }
}

/// All chunks, re-read from the scored-chunks artifact. Mainly for tooling
/// and tests that inspect a finished run.
pub async fn load_scored_chunks(store: &ArtifactStore) -> PipelineResult<Vec<Chunk>> {
    store.read_json(Artifact::ScoredChunks).await
}

/// The persisted final timeline, upgraded across schema versions. A store
/// with no timeline yet reads as an empty one.
pub async fn load_timeline(store: &ArtifactStore) -> PipelineResult<Timeline> {
    if store.state(Artifact::FinalTimeline) == ArtifactState::Pending {
        return Ok(Timeline::empty());
    }

    let value: serde_json::Value = store.read_json(Artifact::FinalTimeline).await?;
    Ok(Timeline::from_value(value)?)
}
