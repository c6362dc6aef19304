/// Shared helpers for unit tests

use std::sync::{Arc, Mutex};
use crate::engine::Engine;
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that records every entry for later inspection
#[derive(Clone, Default)]
pub struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    /// Install a fresh capture logger as the global logger
    ///
    /// Callers must be #[serial] and reset the logger when done.
    pub fn install() -> Self {
        let capture = Self::default();
        Engine::set_logger(capture.clone());
        capture
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    /// Whether an entry of `severity` contains `needle`
    pub fn contains(&self, severity: LogSeverity, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|e| e.severity == severity && e.message.contains(needle))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}
