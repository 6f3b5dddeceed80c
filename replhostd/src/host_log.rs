//! # Host Log
//!
//! Structured logging for the daemon itself.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not printf-style. Entries carry a
//! level, a message, and key/value fields; the sink decides rendering.
//! The fatal-trap path never logs.

use std::io::Write;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: String) -> Self {
        Self {
            level,
            message,
            fields: Vec::new(),
        }
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: String, value: String) -> Self {
        self.fields.push((key, value));
        self
    }
}

/// Destination for log entries
pub trait LogSink {
    /// Receives one entry.
    fn emit(&mut self, entry: &LogEntry);
}

/// Sink that renders entries to stderr
#[derive(Debug, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn emit(&mut self, entry: &LogEntry) {
        let mut line = format!("[{:?}] {}", entry.level, entry.message);
        for (key, value) in &entry.fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        let _ = writeln!(std::io::stderr(), "{}", line);
    }
}

/// Host logger with a minimum level filter
pub struct HostLogger {
    sink: Box<dyn LogSink>,
    min_level: LogLevel,
}

impl HostLogger {
    /// Creates a logger over a sink.
    pub fn new(sink: Box<dyn LogSink>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Logger that renders to stderr at info level.
    pub fn stderr() -> Self {
        Self::new(Box::new(StderrSink), LogLevel::Info)
    }

    /// Emits an entry if it clears the level filter.
    pub fn emit(&mut self, entry: LogEntry) {
        if entry.level >= self.min_level {
            self.sink.emit(&entry);
        }
    }

    /// Convenience for an info entry with no fields.
    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(LogEntry::new(LogLevel::Info, message.into()));
    }
}
