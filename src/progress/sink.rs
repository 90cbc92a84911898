use serde::Serialize;
use std::sync::mpsc::Sender;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Severity attached to every log record emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Success,
}

/// One log line produced during an orchestration run
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub severity: Severity,
}

/// Receives log records from the engine.
///
/// Implementations must be thread-safe: the engine may run on a worker task
/// and invoke the sink from there. All records for one run are delivered
/// strictly before `build_and_run` returns.
pub trait LogSink: Send + Sync {
    /// Called for every log record, in emission order
    fn log(&self, message: &str, severity: Severity);

    fn info(&self, message: &str) {
        self.log(message, Severity::Info);
    }

    fn warn(&self, message: &str) {
        self.log(message, Severity::Warn);
    }

    fn error(&self, message: &str) {
        self.log(message, Severity::Error);
    }

    fn success(&self, message: &str) {
        self.log(message, Severity::Success);
    }
}

/// Sink that ignores all records
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl LogSink for NoOpSink {
    fn log(&self, _message: &str, _severity: Severity) {
        // Intentionally empty
    }
}

/// Sink that forwards records to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => info!("{}", message),
            Severity::Warn => warn!("{}", message),
            Severity::Error => error!("{}", message),
            Severity::Success => info!("{}", message),
        }
    }
}

/// Sink that sends records over an mpsc channel.
///
/// This is the marshaling path for interactive front-ends: the engine runs
/// on a worker and produces records; the receiving side consumes and renders
/// them wherever it likes. A closed receiver is tolerated so a caller that
/// stopped listening does not bring the build down with it.
pub struct ChannelSink {
    tx: Mutex<Sender<LogRecord>>,
}

impl ChannelSink {
    pub fn new(tx: Sender<LogRecord>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl LogSink for ChannelSink {
    fn log(&self, message: &str, severity: Severity) {
        let record = LogRecord {
            message: message.to_string(),
            severity,
        };
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(record);
        }
    }
}

/// Sink that buffers records in memory, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("sink lock poisoned").clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, message: &str, severity: Severity) {
        self.records
            .lock()
            .expect("sink lock poisoned")
            .push(LogRecord {
                message: message.to_string(),
                severity,
            });
    }
}
