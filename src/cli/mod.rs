pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, LogFormatArg};
pub use output::LogFormatter;
