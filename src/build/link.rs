//! Links all object files into one executable

use super::plan::BuildPlan;
use crate::deps::catalog::link_flags_for;
use crate::engine::EngineError;
use crate::progress::LogSink;
use crate::toolchain::ToolEnvironment;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub struct Linker<'a> {
    env: &'a ToolEnvironment,
    out_dir: &'a Path,
}

impl<'a> Linker<'a> {
    pub fn new(env: &'a ToolEnvironment, out_dir: &'a Path) -> Self {
        Self { env, out_dir }
    }

    /// Executable path: named after the primary source file, next to the
    /// object files
    pub fn executable_path(&self, plan: &BuildPlan) -> PathBuf {
        let stem = plan.primary().source.stem();
        if cfg!(windows) {
            self.out_dir.join(format!("{stem}.exe"))
        } else {
            self.out_dir.join(stem)
        }
    }

    pub async fn link(&self, plan: &BuildPlan, sink: &dyn LogSink) -> Result<PathBuf, EngineError> {
        sink.info("Linking...");

        let driver = if plan.uses_cpp() {
            &self.env.cxx
        } else {
            &self.env.cc
        };
        let executable = self.executable_path(plan);
        debug!(driver = %driver.display(), output = %executable.display(), "Running linker");

        let mut command = Command::new(driver);
        for object in plan.objects() {
            command.arg(object);
        }
        command.arg("-o").arg(&executable);

        if plan.lib_dir.exists() {
            command.arg("-L").arg(&plan.lib_dir);
        }
        for package in &plan.packages {
            if let Some(flag) = link_flags_for(package) {
                command.arg(flag);
            }
        }
        // Static runtime keeps the produced binary free of toolchain
        // prerequisites on the target machine
        command.arg("-static-libgcc").arg("-static-libstdc++");

        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(path) = self.env.search_path() {
            command.env("PATH", path);
        }

        let output = command.output().await.map_err(|_| EngineError::Link)?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            if !stderr.trim().is_empty() {
                sink.error(stderr.trim());
            }
            return Err(EngineError::Link);
        }
        if !stderr.trim().is_empty() {
            sink.warn(stderr.trim());
        }

        sink.success("Build successful!");
        Ok(executable)
    }
}
