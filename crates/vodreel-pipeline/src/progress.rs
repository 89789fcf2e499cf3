//! Stage progress reporting.

use tracing::info;

/// Observer for coarse-grained stage completion.
///
/// The runner reports each completed stage with its sequence number; it does
/// not own logging or presentation policy beyond that.
pub trait ProgressObserver: Send + Sync {
    fn stage_completed(&self, sequence: usize, stage: &str);
}

/// Default observer that reports stages through tracing.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn stage_completed(&self, sequence: usize, stage: &str) {
        info!(sequence, stage, "Stage completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        stages: Mutex<Vec<(usize, String)>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn stage_completed(&self, sequence: usize, stage: &str) {
            self.stages.lock().unwrap().push((sequence, stage.into()));
        }
    }

    #[test]
    fn test_observer_records_in_order() {
        let observer = RecordingObserver::default();
        observer.stage_completed(1, "audio_scoring");
        observer.stage_completed(2, "text_scoring");

        let stages = observer.stages.lock().unwrap();
        assert_eq!(stages[0], (1, "audio_scoring".to_string()));
        assert_eq!(stages[1].0, 2);
    }
}
