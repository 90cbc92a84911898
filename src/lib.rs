//! cforge - zero-setup C/C++ build-and-run tool
//!
//! This library turns a handful of C/C++ source files into a running
//! executable without a build file: it scans `#include` directives,
//! installs known third-party dependencies through vcpkg, compiles
//! incrementally, links one executable and streams its output back.
//!
//! # Core Concepts
//!
//! - **Engine**: [`BuildEngine`] sequences the whole pipeline — expand,
//!   environment, analyze, install, compile, link, run — fail-fast and
//!   strictly in order
//! - **Log sink**: the engine never prints; every human-facing message goes
//!   through a caller-supplied [`LogSink`], and the entry point returns only
//!   a boolean outcome
//! - **Incremental builds**: one object file per source, reused when the
//!   object is newer than the source
//!
//! # Example Usage
//!
//! ```ignore
//! use cforge::{BuildEngine, CforgeConfig, TracingSink};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn build() {
//! let engine = BuildEngine::new(CforgeConfig::from_env(), Arc::new(TracingSink));
//! let ok = engine
//!     .build_and_run(&[PathBuf::from("main.cpp")], Some("-O2"), false, true)
//!     .await;
//! assert!(ok);
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`source`]: source set expansion and include scanning
//! - [`deps`]: header-to-package resolution and installation
//! - [`build`]: compile, link and run stages
//! - [`toolchain`] / [`store`]: external collaborator boundaries
//! - [`engine`]: the orchestrator

// Public modules
pub mod build;
pub mod cli;
pub mod config;
pub mod deps;
pub mod engine;
pub mod progress;
pub mod source;
pub mod store;
pub mod toolchain;
pub mod util;

// Re-export key types for convenient access
pub use build::{BuildPlan, CompiledArtifact, ExecutionResult, Staleness};
pub use config::CforgeConfig;
pub use engine::{BuildEngine, BuildStage, EngineError};
pub use progress::{ChannelSink, LogRecord, LogSink, MemorySink, NoOpSink, Severity, TracingSink};
pub use source::{Language, SourceFile};
pub use store::{PackageStore, VcpkgStore};
pub use toolchain::{SystemToolchain, ToolEnvironment, ToolchainProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
