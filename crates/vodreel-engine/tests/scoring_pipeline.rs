//! End-to-end scoring run over a synthetic recording.
//!
//! Eight 45-second chunks of a 360-second recording, with a loud two-chunk
//! event in the middle backed by a chat burst. Exercises every stage in
//! order and checks the invariants that hold across stage boundaries.

use std::collections::BTreeSet;

use vodreel_engine::{
    align_to_video, apply_buffers, apply_chat_boost, apply_phase1_scores, combine_chat_scores,
    detect_spikes, emote_density, emote_scores, filter_false_positives, filter_short_intervals,
    flag_highlights, keyword_hits, keyword_scores, merge_adjacent_highlights,
    messages_per_second, repeated_emotes, rolling_baseline, score_audio, score_text,
    smooth_chat_scores, EngineConfig,
};
use vodreel_models::{
    AlignedChatSample, ChatMessage, Chunk, HighlightReason, KeywordConfig, MpsSample,
    SentimentLexicon,
};

const CHUNK_SECS: f64 = 45.0;
const VIDEO_SECS: i64 = 360;

fn synthetic_chunks() -> Vec<Chunk> {
    (0..8u32)
        .map(|id| {
            let start = f64::from(id) * CHUNK_SECS;
            let mut chunk = Chunk::new(id, format!("chunk_{id:04}.mp4"), start, start + CHUNK_SECS);
            chunk.audio_rms = match id {
                3 => 0.3,
                4 => 0.25,
                _ => 0.05,
            };
            chunk.transcript = match id {
                3 => Some("that was an insane clutch lets go".into()),
                4 => Some("still insane".into()),
                _ => Some("just farming resources".into()),
            };
            chunk
        })
        .collect()
}

fn keyword_config() -> KeywordConfig {
    let mut config = KeywordConfig {
        categories: Default::default(),
        sentiment: SentimentLexicon {
            positive: vec!["lets go".into()],
            negative: vec![],
        },
    };
    config
        .categories
        .insert("hype".into(), vec!["clutch".into(), "insane".into()]);
    config
}

/// Quiet background chat with a heavy burst over the loud event.
fn synthetic_chat() -> Vec<ChatMessage> {
    let mut messages = Vec::new();

    // One idle message every 10 seconds keeps the baseline below the
    // spike-detection floor outside the burst.
    for s in (0..VIDEO_SECS).step_by(10) {
        messages.push(ChatMessage {
            offset_secs: s as f64 + 0.5,
            text: "hello there".into(),
            emote_tokens: vec![],
        });
    }

    // Burst during chunk 3 (135..180s).
    for s in 150..160 {
        for i in 0..10 {
            messages.push(ChatMessage {
                offset_secs: s as f64 + f64::from(i) * 0.1,
                text: "clip it that was nuts".into(),
                emote_tokens: vec!["PogChamp".into(), "PogChamp".into()],
            });
        }
    }

    messages
}

fn chat_timeline(
    messages: &[ChatMessage],
    config: &EngineConfig,
) -> (Vec<MpsSample>, Vec<AlignedChatSample>) {
    let chat_keywords: BTreeSet<String> = ["clip it".to_string(), "nuts".to_string()].into();
    let hype_emotes: BTreeSet<String> = ["PogChamp".to_string()].into();

    let mps = messages_per_second(messages);
    let baseline = rolling_baseline(&mps, config.chat.baseline_window_secs);
    let spikes = detect_spikes(&baseline, &config.chat);

    let density = emote_density(messages);
    let repeats = repeated_emotes(messages);
    let emotes = emote_scores(&density, &repeats, &hype_emotes, config.chat.emote_score_scale);

    let hits = keyword_hits(messages, &chat_keywords);
    let keywords = keyword_scores(&hits, config.chat.keyword_score_scale);

    let combined = combine_chat_scores(&spikes, &emotes, &keywords, &config.chat);
    let smoothed = smooth_chat_scores(&combined, config.chat.smoothing_window_secs);
    let aligned = align_to_video(&smoothed, config.chat.chat_to_video_offset_secs, VIDEO_SECS);

    (mps, aligned)
}

fn run_full_pipeline(config: &EngineConfig) -> (Vec<Chunk>, Vec<vodreel_models::HighlightInterval>) {
    let mut chunks = synthetic_chunks();
    score_audio(&mut chunks, &config.audio).unwrap();
    score_text(&mut chunks, &keyword_config()).unwrap();
    apply_phase1_scores(&mut chunks, config).unwrap();

    let messages = synthetic_chat();
    let (mps, aligned) = chat_timeline(&messages, config);
    apply_chat_boost(&mut chunks, &mps, &aligned, config);

    flag_highlights(&mut chunks, config);
    filter_false_positives(&mut chunks, config);

    let mut intervals = merge_adjacent_highlights(&chunks, &config.segment);
    apply_buffers(&mut intervals, &config.segment);
    let intervals = filter_short_intervals(intervals, &config.segment);

    (chunks, intervals)
}

#[test]
fn test_loud_event_becomes_one_buffered_interval() {
    let config = EngineConfig::balanced();
    let (chunks, intervals) = run_full_pipeline(&config);

    // The loud pair flags on audio and transcript alone.
    assert!(chunks[3].is_highlight());
    assert!(chunks[4].is_highlight());
    assert_eq!(chunks[3].highlight.reason(), Some(HighlightReason::Phase1));

    // Quiet chunks never flag.
    for id in [0usize, 1, 2, 5, 6, 7] {
        assert!(!chunks[id].is_highlight(), "chunk {id} should stay quiet");
    }

    // Contiguous highlights merge into one interval, then gain buffers.
    assert_eq!(intervals.len(), 1);
    let interval = &intervals[0];
    assert_eq!(interval.id, "hl_0000");
    assert_eq!(interval.chunk_ids, vec![3, 4]);
    assert_eq!(interval.start_time, 130.0);
    assert_eq!(interval.end_time, 230.0);
    assert_eq!(interval.duration, Some(100.0));
}

#[test]
fn test_scores_stay_bounded_and_monotonic() {
    let config = EngineConfig::balanced();
    let (chunks, _) = run_full_pipeline(&config);

    for chunk in &chunks {
        assert!((0.0..=1.0).contains(&chunk.audio_score));
        assert!((0.0..=1.0).contains(&chunk.text_score));
        assert!((0.0..=1.0).contains(&chunk.final_score));
        assert!(chunk.chat_boost >= 0.0);
        assert!(chunk.chat_boost <= config.chat.chat_boost_max);
        // The boost only ever adds.
        assert!(chunk.final_score >= chunk.phase1_score - f64::EPSILON);
    }
}

#[test]
fn test_chat_burst_boosts_the_event_chunk() {
    let config = EngineConfig::balanced();
    let (chunks, _) = run_full_pipeline(&config);

    assert!(
        chunks[3].chat_boost > 0.0,
        "burst during chunk 3 should produce a boost, got {}",
        chunks[3].chat_boost
    );
    assert!(!chunks[3].chat_suppressed);
}

#[test]
fn test_chat_influence_disabled_leaves_phase1_scores() {
    let mut config = EngineConfig::balanced();
    config.chat.enable_chat_influence = false;
    let (chunks, _) = run_full_pipeline(&config);

    for chunk in &chunks {
        assert_eq!(chunk.chat_boost, 0.0);
        assert!((chunk.final_score - chunk.phase1_score).abs() < f64::EPSILON);
    }
}

#[test]
fn test_run_is_deterministic() {
    let config = EngineConfig::balanced();
    let (chunks_a, intervals_a) = run_full_pipeline(&config);
    let (chunks_b, intervals_b) = run_full_pipeline(&config);

    let a = serde_json::to_string(&chunks_a).unwrap();
    let b = serde_json::to_string(&chunks_b).unwrap();
    assert_eq!(a, b);
    assert_eq!(intervals_a, intervals_b);
}

#[test]
fn test_flat_recording_yields_no_intervals() {
    let config = EngineConfig::balanced();

    let mut chunks: Vec<Chunk> = (0..6u32)
        .map(|id| {
            let start = f64::from(id) * CHUNK_SECS;
            let mut c = Chunk::new(id, format!("chunk_{id:04}.mp4"), start, start + CHUNK_SECS);
            c.audio_rms = 0.05;
            c.transcript = Some("nothing happening".into());
            c
        })
        .collect();

    score_audio(&mut chunks, &config.audio).unwrap();
    score_text(&mut chunks, &keyword_config()).unwrap();
    apply_phase1_scores(&mut chunks, &config).unwrap();
    flag_highlights(&mut chunks, &config);
    filter_false_positives(&mut chunks, &config);

    let intervals = merge_adjacent_highlights(&chunks, &config.segment);
    assert!(intervals.is_empty());
    assert!(filter_short_intervals(intervals, &config.segment).is_empty());
}
