//! vcpkg-backed package store

use super::PackageStore;
use crate::progress::LogSink;
use crate::toolchain::locate_on_path;
use crate::util::pipes;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Drives a vcpkg checkout rooted under the cforge home directory, or a
/// `vcpkg` binary already on `PATH` when the checkout is absent.
pub struct VcpkgStore {
    root: PathBuf,
    triplet: String,
}

impl VcpkgStore {
    pub fn new(root: PathBuf, triplet: String) -> Self {
        Self { root, triplet }
    }

    fn local_executable(&self) -> PathBuf {
        let name = if cfg!(windows) { "vcpkg.exe" } else { "vcpkg" };
        self.root.join(name)
    }

    fn resolve_executable(&self) -> Option<PathBuf> {
        let local = self.local_executable();
        if local.is_file() {
            return Some(local);
        }
        locate_on_path("vcpkg")
    }

    fn installed_root(&self) -> PathBuf {
        self.root.join("installed").join(&self.triplet)
    }
}

#[async_trait]
impl PackageStore for VcpkgStore {
    fn is_installed(&self) -> bool {
        self.resolve_executable().is_some()
    }

    fn triplet(&self) -> &str {
        &self.triplet
    }

    fn include_dir(&self) -> PathBuf {
        self.installed_root().join("include")
    }

    fn lib_dir(&self) -> PathBuf {
        self.installed_root().join("lib")
    }

    fn bin_dir(&self) -> PathBuf {
        self.installed_root().join("bin")
    }

    async fn install(&self, package: &str, sink: &dyn LogSink) -> Result<()> {
        let Some(executable) = self.resolve_executable() else {
            bail!("vcpkg not found; run the bootstrap script first");
        };

        sink.info(&format!("Installing {} for {}...", package, self.triplet));
        debug!(exe = %executable.display(), package, "Spawning vcpkg");

        let mut command = Command::new(&executable);
        command
            .arg("install")
            .arg(format!("{}:{}", package, self.triplet))
            .arg(format!("--host-triplet={}", self.triplet))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if self.root.is_dir() {
            command.current_dir(&self.root);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to launch {}", executable.display()))?;

        // Both pipes drain concurrently, tolerating non-UTF-8 bytes
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let ((), stderr_text) = tokio::join!(
            async {
                if let Some(stdout) = stdout {
                    pipes::forward_lines(stdout, sink).await;
                }
            },
            pipes::collect_lossy(stderr),
        );

        let status = child.wait().await.context("Failed to wait for vcpkg")?;
        if !status.success() {
            if !stderr_text.trim().is_empty() {
                sink.error(stderr_text.trim());
            }
            bail!("Failed to install {package}");
        }

        sink.success(&format!("Successfully installed {package}."));
        Ok(())
    }
}
