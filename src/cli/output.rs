//! Rendering of engine log records for the terminal

use super::commands::LogFormatArg;
use crate::progress::{LogRecord, Severity};

/// Renders log records in the format the user asked for. Runs on the
/// foreground consumer side of the log channel, never inside the engine.
#[derive(Debug, Clone, Copy)]
pub struct LogFormatter {
    format: LogFormatArg,
    quiet: bool,
}

impl LogFormatter {
    pub fn new(format: LogFormatArg, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn render(&self, record: &LogRecord) {
        if self.quiet && !matches!(record.severity, Severity::Error) {
            return;
        }
        match self.format {
            LogFormatArg::Human => match record.severity {
                Severity::Info => println!("{}", record.message),
                Severity::Warn => eprintln!("warning: {}", record.message),
                Severity::Error => eprintln!("error: {}", record.message),
                Severity::Success => println!("{}", record.message),
            },
            LogFormatArg::Json => {
                match serde_json::to_string(record) {
                    Ok(line) => println!("{line}"),
                    Err(err) => eprintln!("error: could not serialize log record: {err}"),
                }
            }
        }
    }
}
