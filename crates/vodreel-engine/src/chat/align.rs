//! Chat-to-video timeline alignment.

use tracing::debug;

use vodreel_models::{AlignedChatSample, SmoothedChatSample};

/// Map the smoothed chat timeline onto video time with a fixed offset.
///
/// Chat second `s` lands at video second `s - offset_secs`. Samples mapping
/// before 0 or at/after the video's total duration are dropped.
pub fn align_to_video(
    timeline: &[SmoothedChatSample],
    offset_secs: i64,
    video_duration_secs: i64,
) -> Vec<AlignedChatSample> {
    let aligned: Vec<AlignedChatSample> = timeline
        .iter()
        .filter_map(|sample| {
            let video_second = sample.second - offset_secs;

            if video_second < 0 || video_second >= video_duration_secs {
                return None;
            }

            Some(AlignedChatSample {
                video_second,
                chat_second: sample.second,
                score: sample.score,
                activity: sample.activity,
                emote: sample.emote,
                keyword: sample.keyword,
            })
        })
        .collect();

    debug!(
        offset_secs,
        seconds = aligned.len(),
        dropped = timeline.len() - aligned.len(),
        "Chat-video alignment complete"
    );

    aligned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(second: i64, score: f64) -> SmoothedChatSample {
        SmoothedChatSample {
            second,
            score,
            raw_score: score,
            activity: 0.0,
            emote: 0.0,
            keyword: 0.0,
        }
    }

    #[test]
    fn test_offset_shifts_seconds() {
        let aligned = align_to_video(&[sample(10, 0.5)], 3, 600);
        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].video_second, 7);
        assert_eq!(aligned[0].chat_second, 10);
    }

    #[test]
    fn test_out_of_range_samples_dropped() {
        let timeline = vec![sample(1, 0.1), sample(50, 0.2), sample(700, 0.3)];
        let aligned = align_to_video(&timeline, 5, 600);

        // Second 1 maps to -4 (dropped), 700 maps to 695 >= 600 (dropped)
        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].video_second, 45);
    }

    #[test]
    fn test_negative_offset_leads_video() {
        let aligned = align_to_video(&[sample(0, 0.9)], -15, 600);
        assert_eq!(aligned[0].video_second, 15);
    }
}
