//! Status reporter adapters.

use std::sync::{Arc, Mutex};

use strata_core::application::pipeline::Stage;
use strata_core::application::ports::StatusReporter;

/// Discards all status output. For tests that only care about results.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_completed(&self, _stage: Stage) {}

    fn warning(&self, _message: &str) {}
}

/// One recorded reporter event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterEvent {
    Started(Stage),
    Completed(Stage),
    Warning(String),
}

/// Records every event for assertions on stage order and warnings.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<ReporterEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReporterEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The stages that started, in order.
    pub fn stages_started(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReporterEvent::Started(stage) => Some(stage),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReporterEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ReporterEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl StatusReporter for RecordingReporter {
    fn stage_started(&self, stage: Stage) {
        self.record(ReporterEvent::Started(stage));
    }

    fn stage_completed(&self, stage: Stage) {
        self.record(ReporterEvent::Completed(stage));
    }

    fn warning(&self, message: &str) {
        self.record(ReporterEvent::Warning(message.to_string()));
    }
}
