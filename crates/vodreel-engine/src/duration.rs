//! Minimum-duration filtering.

use tracing::debug;

use vodreel_models::HighlightInterval;

use crate::config::SegmentConfig;

/// Drop intervals too short to make a worthwhile clip.
///
/// Runs after buffering, so the buffers count toward the duration. Surviving
/// intervals get their `duration` field attached and keep their relative
/// order; ids and order indexes are not renumbered, so gaps in the `hl_` id
/// sequence mark where short intervals were dropped.
pub fn filter_short_intervals(
    intervals: Vec<HighlightInterval>,
    config: &SegmentConfig,
) -> Vec<HighlightInterval> {
    let before = intervals.len();

    let kept: Vec<HighlightInterval> = intervals
        .into_iter()
        .filter_map(|mut interval| {
            let duration = interval.duration_secs();
            if duration < config.min_highlight_duration_secs {
                debug!(
                    id = %interval.id,
                    duration_secs = duration,
                    min_secs = config.min_highlight_duration_secs,
                    "Interval dropped, too short"
                );
                return None;
            }
            interval.duration = Some(duration);
            Some(interval)
        })
        .collect();

    debug!(before, after = kept.len(), "Short intervals filtered");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SegmentConfig {
        SegmentConfig::default() // min duration 10s
    }

    #[test]
    fn test_short_interval_dropped() {
        let intervals = vec![
            HighlightInterval::new(0, 0.0, 8.0, vec![0]),
            HighlightInterval::new(1, 100.0, 150.0, vec![2]),
        ];

        let kept = filter_short_intervals(intervals, &config());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "hl_0001");
        assert_eq!(kept[0].duration, Some(50.0));
    }

    #[test]
    fn test_exact_minimum_survives() {
        let intervals = vec![HighlightInterval::new(0, 0.0, 10.0, vec![0])];
        let kept = filter_short_intervals(intervals, &config());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let intervals = vec![
            HighlightInterval::new(0, 0.0, 30.0, vec![0]),
            HighlightInterval::new(1, 50.0, 55.0, vec![1]),
            HighlightInterval::new(2, 80.0, 120.0, vec![2]),
        ];

        let kept = filter_short_intervals(intervals, &config());
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["hl_0000", "hl_0002"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_short_intervals(Vec::new(), &config()).is_empty());
    }
}
