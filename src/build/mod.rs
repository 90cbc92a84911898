//! Compilation, linking and execution of the build plan

pub mod compile;
pub mod link;
pub mod plan;
pub mod run;

pub use compile::{split_flags, IncrementalCompiler};
pub use link::Linker;
pub use plan::{BuildPlan, CompiledArtifact, Staleness};
pub use run::{ExecutionResult, Runner};
