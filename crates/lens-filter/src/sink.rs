//! Logging port of the filter engine.
//!
//! The engine never logs through globals. Callers hand a [`LogSink`] to the
//! [`FilterContext`](crate::FilterContext); the default is [`NoopSink`].

use std::sync::{Mutex, PoisonError};

use serde_json::Value;

pub use log::Level;

/// Receives diagnostic events from the engine.
pub trait LogSink {
    /// Records one event. `data` carries structured context, if any.
    fn log(&self, level: Level, message: &str, data: Option<&Value>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _level: Level, _message: &str, _data: Option<&Value>) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogCrateSink {
    target: &'static str,
}

impl LogCrateSink {
    /// Creates a sink logging under `target`.
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogCrateSink {
    fn default() -> Self {
        Self::new("lens_filter")
    }
}

impl LogSink for LogCrateSink {
    fn log(&self, level: Level, message: &str, data: Option<&Value>) {
        match data {
            Some(data) => log::log!(target: self.target, level, "{} {}", message, data),
            None => log::log!(target: self.target, level, "{}", message),
        }
    }
}

/// One captured event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub data: Option<Value>,
}

/// Keeps events in memory, e.g. for a debug panel or assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured events, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every captured event.
    pub fn drain(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str, data: Option<&Value>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_string(),
                data: data.cloned(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.log(Level::Debug, "first", None);
        sink.log(Level::Warn, "second", Some(&json!({"attribute": "city"})));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].level, Level::Warn);
        assert_eq!(entries[1].data, Some(json!({"attribute": "city"})));
    }

    #[test]
    fn test_memory_sink_drain_empties() {
        let sink = MemorySink::new();
        sink.log(Level::Info, "event", None);

        assert_eq!(sink.drain().len(), 1);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_noop_and_log_crate_sinks_accept_events() {
        NoopSink.log(Level::Error, "ignored", None);
        LogCrateSink::default().log(Level::Trace, "forwarded", Some(&json!(1)));
    }
}
