//! Triage telemetry events and sinks.
//!
//! Seedling runs as a short-lived command, but it still benefits from
//! lightweight telemetry that records each decision and every write it makes
//! on a pull request.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by Seedling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A pull request was evaluated.
    DecisionRecorded {
        /// Pull request in `owner/repo#n` form.
        pull_request: String,
        /// `skipped`, `not_qualified`, or `qualified`.
        decision: String,
        /// Heuristic total; absent for skipped pull requests.
        score: Option<u32>,
        /// Threshold in force.
        threshold: u32,
    },
    /// The label write succeeded.
    LabelApplied {
        /// Pull request in `owner/repo#n` form.
        pull_request: String,
        /// Label text.
        label: String,
    },
    /// The explanatory comment was created.
    CommentPosted {
        /// Pull request in `owner/repo#n` form.
        pull_request: String,
        /// GitHub comment identifier.
        comment_id: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Drains the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
