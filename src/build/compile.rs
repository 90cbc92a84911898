//! Per-file incremental compilation
//!
//! One object file per source file, named after the source's base name in
//! the output directory. Staleness is a single-level mtime comparison: no
//! content hashing, no manifest. The first compiler failure aborts the whole
//! build; a partially compiled set is never linked.

use super::plan::{BuildPlan, CompiledArtifact, Staleness};
use crate::engine::EngineError;
use crate::progress::LogSink;
use crate::source::SourceFile;
use crate::toolchain::ToolEnvironment;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub struct IncrementalCompiler<'a> {
    env: &'a ToolEnvironment,
    out_dir: &'a Path,
}

impl<'a> IncrementalCompiler<'a> {
    pub fn new(env: &'a ToolEnvironment, out_dir: &'a Path) -> Self {
        Self { env, out_dir }
    }

    /// Object file path for a source file: `<out_dir>/<stem>.o`
    pub fn object_path(&self, source: &SourceFile) -> PathBuf {
        self.out_dir.join(format!("{}.o", source.stem()))
    }

    /// Fresh iff the object exists, the run is not a clean build, and the
    /// source mtime is strictly earlier than the object mtime
    pub fn classify(&self, source: &SourceFile, clean: bool) -> Staleness {
        if clean {
            return Staleness::Stale;
        }
        let object = self.object_path(source);
        let source_mtime = fs::metadata(&source.path).and_then(|m| m.modified());
        let object_mtime = fs::metadata(&object).and_then(|m| m.modified());
        match (source_mtime, object_mtime) {
            (Ok(src), Ok(obj)) if src < obj => Staleness::Fresh,
            _ => Staleness::Stale,
        }
    }

    /// Builds the run's plan: one artifact per source, in source order
    pub fn plan(
        &self,
        sources: Vec<SourceFile>,
        packages: BTreeSet<String>,
        include_dir: PathBuf,
        lib_dir: PathBuf,
        bin_dir: PathBuf,
        clean: bool,
    ) -> BuildPlan {
        let artifacts = sources
            .into_iter()
            .map(|source| {
                let object = self.object_path(&source);
                let staleness = self.classify(&source, clean);
                CompiledArtifact {
                    source,
                    object,
                    staleness,
                }
            })
            .collect();
        BuildPlan {
            artifacts,
            packages,
            include_dir,
            lib_dir,
            bin_dir,
        }
    }

    /// Compiles every stale artifact in plan order, skipping fresh ones
    pub async fn compile(
        &self,
        plan: &BuildPlan,
        extra_flags: Option<&str>,
        sink: &dyn LogSink,
    ) -> Result<(), EngineError> {
        let mut base_flags: Vec<String> = Vec::new();
        if plan.include_dir.exists() {
            base_flags.push("-I".to_string());
            base_flags.push(plan.include_dir.display().to_string());
        }
        if let Some(extra) = extra_flags {
            base_flags.extend(split_flags(extra));
        }

        for artifact in &plan.artifacts {
            let name = artifact.source.file_name();
            if artifact.staleness == Staleness::Fresh {
                sink.info(&format!("Skipping {name} (up to date)"));
                continue;
            }

            sink.info(&format!("Compiling {name}..."));
            let compiler = self.env.compiler_for(artifact.source.language);
            debug!(compiler = %compiler.display(), source = %name, "Running compiler");

            let mut command = Command::new(compiler);
            command
                .arg("-c")
                .arg(&artifact.source.path)
                .arg("-o")
                .arg(&artifact.object)
                .args(&base_flags)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            if let Some(path) = self.env.search_path() {
                command.env("PATH", path);
            }

            let output = command
                .output()
                .await
                .map_err(|_| EngineError::Compilation(artifact.source.path.clone()))?;

            let stderr = String::from_utf8_lossy(&output.stderr);
            if !output.status.success() {
                if !stderr.trim().is_empty() {
                    sink.error(stderr.trim());
                }
                return Err(EngineError::Compilation(artifact.source.path.clone()));
            }
            if !stderr.trim().is_empty() {
                // Warnings from a successful compile still reach the caller
                sink.warn(stderr.trim());
            }
        }

        Ok(())
    }
}

/// Splits a caller-supplied flag string shell-style, falling back to naive
/// whitespace splitting when the string is not valid shell syntax
pub fn split_flags(raw: &str) -> Vec<String> {
    shlex::split(raw)
        .unwrap_or_else(|| raw.split_whitespace().map(String::from).collect())
}
