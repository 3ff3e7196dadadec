use parking_lot::Mutex;
use tracing::error;

/// Sink for failures that must not cross a gesture or UI boundary.
pub trait ErrorRecorder: Send + Sync {
    fn record_error(&self, error: &anyhow::Error, reason: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorRecorder;

impl ErrorRecorder for TracingErrorRecorder {
    fn record_error(&self, err: &anyhow::Error, reason: &str) {
        error!(reason, error = %format!("{err:#}"), "recorded error");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub reason: String,
    pub message: String,
}

/// Keeps every recorded error in memory.
#[derive(Debug, Default)]
pub struct CollectingErrorRecorder {
    entries: Mutex<Vec<RecordedError>>,
}

impl CollectingErrorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RecordedError> {
        self.entries.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ErrorRecorder for CollectingErrorRecorder {
    fn record_error(&self, err: &anyhow::Error, reason: &str) {
        self.entries.lock().push(RecordedError {
            reason: reason.to_string(),
            message: format!("{err:#}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn collecting_recorder_keeps_reason_and_chain() {
        let recorder = CollectingErrorRecorder::new();
        let err = anyhow!("disk full").context("saving notes");
        recorder.record_error(&err, "could not highlight verses");
        assert_eq!(
            recorder.entries(),
            vec![RecordedError {
                reason: "could not highlight verses".into(),
                message: "saving notes: disk full".into(),
            }]
        );
    }
}
