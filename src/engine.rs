//! Build orchestration engine
//!
//! [`BuildEngine`] sequences the whole pipeline: expand sources, resolve the
//! toolchain, analyze includes, install dependencies, compile incrementally,
//! link, and optionally run the result. Stages are strictly sequential and
//! fail-fast; no stage is revisited and nothing runs in parallel. The only
//! output that crosses the boundary is a boolean outcome plus the log
//! transcript delivered through the engine's sink.
//!
//! There is no cancellation or timeout anywhere in the pipeline: a hung
//! external process hangs the run. Concurrent runs sharing one output
//! directory are undefined; callers serialize.

use crate::build::{IncrementalCompiler, Linker, Runner};
use crate::config::CforgeConfig;
use crate::deps::{installer, resolve_packages};
use crate::progress::LogSink;
use crate::source::{expand_sources, scan_includes, ExpandError};
use crate::store::{PackageStore, VcpkgStore};
use crate::toolchain::{SystemToolchain, ToolchainProvider};
use crate::util::retry;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const OUT_DIR_ATTEMPTS: u32 = 3;
const OUT_DIR_DELAY: Duration = Duration::from_millis(200);

/// Pipeline stages, in execution order. Used for diagnostics only; the
/// caller sees log lines and a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Expand,
    Environment,
    Analyze,
    Install,
    Compile,
    Link,
    Run,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Expand => "expand",
            BuildStage::Environment => "environment",
            BuildStage::Analyze => "analyze",
            BuildStage::Install => "install",
            BuildStage::Compile => "compile",
            BuildStage::Link => "link",
            BuildStage::Run => "run",
        };
        f.write_str(name)
    }
}

/// Everything that can terminate a run early. Never crosses the engine
/// boundary; `build_and_run` reports it through the sink and returns false.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No valid source files found")]
    NoSourceFiles,

    #[error("File not found: {0}")]
    MissingFile(PathBuf),

    #[error("Environment setup failed: {0}")]
    EnvironmentSetup(String),

    #[error("Failed to install dependency: {0}")]
    DependencyInstall(String),

    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation failed for {0}")]
    Compilation(PathBuf),

    #[error("Linking failed")]
    Link,

    #[error("Execution error: {0}")]
    Execution(#[source] std::io::Error),
}

impl EngineError {
    pub fn stage(&self) -> BuildStage {
        match self {
            EngineError::NoSourceFiles | EngineError::MissingFile(_) => BuildStage::Expand,
            EngineError::EnvironmentSetup(_) => BuildStage::Environment,
            EngineError::DependencyInstall(_) => BuildStage::Install,
            EngineError::OutputDir { .. } | EngineError::Compilation(_) => BuildStage::Compile,
            EngineError::Link => BuildStage::Link,
            EngineError::Execution(_) => BuildStage::Run,
        }
    }
}

impl From<ExpandError> for EngineError {
    fn from(err: ExpandError) -> Self {
        match err {
            ExpandError::NoSourceFiles => EngineError::NoSourceFiles,
            ExpandError::MissingFile(path) => EngineError::MissingFile(path),
        }
    }
}

/// The orchestrator. One instance serves one platform triplet and one
/// output directory; a single run at a time.
pub struct BuildEngine {
    config: CforgeConfig,
    toolchain: Arc<dyn ToolchainProvider>,
    store: Arc<dyn PackageStore>,
    sink: Arc<dyn LogSink>,
}

impl BuildEngine {
    /// Production wiring: system toolchain discovery plus a vcpkg store
    /// rooted under the configured home directory
    pub fn new(config: CforgeConfig, sink: Arc<dyn LogSink>) -> Self {
        let toolchain = Arc::new(SystemToolchain::new(config.toolchain_root()));
        let store = Arc::new(VcpkgStore::new(config.vcpkg_root(), config.triplet.clone()));
        Self::with_components(config, toolchain, store, sink)
    }

    /// Custom wiring for embedding and tests
    pub fn with_components(
        config: CforgeConfig,
        toolchain: Arc<dyn ToolchainProvider>,
        store: Arc<dyn PackageStore>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            config,
            toolchain,
            store,
            sink,
        }
    }

    /// Entry point: builds the given sources and, when `run` is set,
    /// executes the result. Returns true on build success; a non-zero exit
    /// of the executed program does not flip the outcome.
    pub async fn build_and_run(
        &self,
        sources: &[PathBuf],
        extra_flags: Option<&str>,
        clean: bool,
        run: bool,
    ) -> bool {
        match self.execute(sources, extra_flags, clean, run).await {
            Ok(()) => true,
            Err(err) => {
                debug!(stage = %err.stage(), "Pipeline failed");
                self.sink.error(&err.to_string());
                false
            }
        }
    }

    async fn execute(
        &self,
        sources: &[PathBuf],
        extra_flags: Option<&str>,
        clean: bool,
        run: bool,
    ) -> Result<(), EngineError> {
        // Expand: fails before any external process is invoked
        let sources = expand_sources(sources)?;
        info!(files = sources.len(), "Source set expanded");

        // Environment
        let tool_env = self
            .toolchain
            .ensure_available(self.sink.as_ref())
            .map_err(|err| EngineError::EnvironmentSetup(format!("{err:#}")))?;

        // Analyze
        let mut references = BTreeSet::new();
        for source in &sources {
            self.sink
                .info(&format!("Analyzing {}...", source.file_name()));
            references.extend(scan_includes(&source.path, self.sink.as_ref()));
        }
        let packages = resolve_packages(&references);

        // Install
        if packages.is_empty() {
            self.sink.info("No external dependencies detected.");
        } else {
            let names: Vec<&str> = packages.iter().map(String::as_str).collect();
            self.sink
                .info(&format!("Identified dependencies: {}", names.join(", ")));
            installer::install_all(self.store.as_ref(), &packages, self.sink.as_ref()).await?;
        }

        // Compile
        self.sink.info("Compiling...");
        retry::with_backoff(OUT_DIR_ATTEMPTS, OUT_DIR_DELAY, || {
            std::fs::create_dir_all(&self.config.out_dir)
        })
        .map_err(|err| EngineError::OutputDir {
            path: self.config.out_dir.clone(),
            source: err,
        })?;

        let compiler = IncrementalCompiler::new(&tool_env, &self.config.out_dir);
        let plan = compiler.plan(
            sources,
            packages,
            self.store.include_dir(),
            self.store.lib_dir(),
            self.store.bin_dir(),
            clean,
        );
        compiler
            .compile(&plan, extra_flags, self.sink.as_ref())
            .await?;

        // Link
        let linker = Linker::new(&tool_env, &self.config.out_dir);
        let executable = linker.link(&plan, self.sink.as_ref()).await?;

        // Run
        if run {
            let result = Runner::run(&executable, &plan.bin_dir, self.sink.as_ref()).await?;
            debug!(exit_code = ?result.exit_code, "Execution finished");
        }

        Ok(())
    }
}
