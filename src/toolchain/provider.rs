//! Toolchain provider boundary
//!
//! Locating or installing a compiler is an external concern; the engine only
//! needs a [`ToolEnvironment`] before dependency analysis starts. The
//! production [`SystemToolchain`] probes the system `PATH` first and falls
//! back to a bundled toolchain directory. Downloading and unpacking that
//! bundle is left to the distribution, not done here.

use super::env::{locate_on_path, CompilerFamily, ToolEnvironment};
use crate::progress::LogSink;
use crate::util::retry;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const PROBE_ATTEMPTS: u32 = 3;
const PROBE_DELAY: Duration = Duration::from_millis(200);

/// Locates a usable C/C++ compiler pair. Called once per orchestration run,
/// before dependency analysis.
pub trait ToolchainProvider: Send + Sync {
    fn ensure_available(&self, sink: &dyn LogSink) -> Result<ToolEnvironment>;
}

/// Prefers compilers found on `PATH` (clang family over gcc family) and
/// falls back to a bundled clang under the configured toolchain root.
pub struct SystemToolchain {
    bundled_root: PathBuf,
}

impl SystemToolchain {
    pub fn new(bundled_root: PathBuf) -> Self {
        Self { bundled_root }
    }

    fn bundled_environment(&self) -> Result<ToolEnvironment> {
        let bin = self.bundled_root.join("bin");
        let cc = bin.join(executable("clang"));
        let cxx = bin.join(executable("clang++"));

        // The bundle may still be held by an unpacker or a scanner right
        // after installation; probe with bounded retries.
        retry::with_backoff(PROBE_ATTEMPTS, PROBE_DELAY, || {
            if cc.is_file() && cxx.is_file() {
                Ok(())
            } else {
                Err(anyhow!(
                    "No C/C++ compiler found on PATH and no bundled toolchain at {}",
                    bin.display()
                ))
            }
        })?;

        Ok(ToolEnvironment {
            cc,
            cxx,
            family: CompilerFamily::Clang,
            extra_paths: vec![bin],
        })
    }
}

impl ToolchainProvider for SystemToolchain {
    fn ensure_available(&self, sink: &dyn LogSink) -> Result<ToolEnvironment> {
        sink.info("Checking environment...");

        for family in [CompilerFamily::Clang, CompilerFamily::Gnu] {
            let cc = locate_on_path(family.c_compiler());
            let cxx = locate_on_path(family.cpp_compiler());
            if let (Some(cc), Some(cxx)) = (cc, cxx) {
                debug!(cc = %cc.display(), cxx = %cxx.display(), "Using system compiler");
                return Ok(ToolEnvironment {
                    cc,
                    cxx,
                    family,
                    extra_paths: Vec::new(),
                });
            }
        }

        debug!(root = %self.bundled_root.display(), "No system compiler, trying bundled toolchain");
        self.bundled_environment()
    }
}

fn executable(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}
