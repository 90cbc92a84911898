//! Log sink boundary between the build engine and its caller
//!
//! The engine never prints directly. Every human-facing message goes through
//! a [`LogSink`] provided by the caller. Sinks are `Send + Sync` so a whole
//! orchestration run can execute on a worker task while the caller renders
//! records on its own context (see [`ChannelSink`]).

pub mod sink;

pub use sink::{ChannelSink, LogRecord, LogSink, MemorySink, NoOpSink, Severity, TracingSink};
