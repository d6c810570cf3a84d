//! Notifier adapters.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::ports::Notifier;

/// Notifier that emits warnings as structured log events.
///
/// The server has no toast surface; operators see these in the log stream
/// and the front end renders its own copy of the warning.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn warn(&self, message: &str) {
        warn!(message, "user-facing warning");
    }
}

/// Notifier that records warnings for test assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    warnings: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the warnings surfaced so far.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
