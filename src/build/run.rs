//! Executes the produced binary and streams its output

use crate::engine::EngineError;
use crate::progress::LogSink;
use crate::util::pipes;
use std::env;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Outcome of running the built executable. A non-zero exit is recorded
/// here but does not fail the pipeline; the build itself already succeeded.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stderr: String,
}

pub struct Runner;

impl Runner {
    /// Spawns `executable` with the package binary directory prefixed onto
    /// `PATH` so shared runtime libraries resolve. Stdout is forwarded to
    /// the sink line-by-line as it is produced, not buffered until exit.
    ///
    /// Failing to launch at all is a pipeline error; a launched process
    /// exiting non-zero only produces warnings.
    pub async fn run(
        executable: &Path,
        bin_dir: &Path,
        sink: &dyn LogSink,
    ) -> Result<ExecutionResult, EngineError> {
        sink.info("Running...");

        let mut command = Command::new(executable);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        if bin_dir.exists() {
            command.env("PATH", prefixed_path(bin_dir));
        }

        debug!(executable = %executable.display(), "Launching built executable");
        let mut child = command.spawn().map_err(EngineError::Execution)?;

        // Both pipes drain concurrently; a child filling stderr while
        // stdout is still open must not stall the run
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

        let status = child.wait().await.map_err(EngineError::Execution)?;
        let stderr_text = stderr_text.trim().to_string();

        if !status.success() {
            sink.warn(&format!(
                "Execution finished with exit code {}",
                status.code().map_or_else(|| "unknown".to_string(), |c| c.to_string())
            ));
            if !stderr_text.is_empty() {
                sink.warn(&stderr_text);
            }
        }

        Ok(ExecutionResult {
            exit_code: status.code(),
            success: status.success(),
            stderr: stderr_text,
        })
    }
}

fn prefixed_path(bin_dir: &Path) -> std::ffi::OsString {
    let inherited = env::var_os("PATH").unwrap_or_default();
    let combined = std::iter::once(bin_dir.to_path_buf()).chain(env::split_paths(&inherited));
    env::join_paths(combined).unwrap_or_else(|_| bin_dir.as_os_str().to_os_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{MemorySink, Severity};

    #[cfg(unix)]
    fn script(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join("app");
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streams_stdout_lines_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = script(&dir, "echo first\necho second\necho third\n");
        let sink = MemorySink::new();

        let result = Runner::run(&app, Path::new("/nonexistent"), &sink)
            .await
            .unwrap();

        assert!(result.success);
        let messages = sink.messages();
        let first = messages.iter().position(|m| m == "first").unwrap();
        let second = messages.iter().position(|m| m == "second").unwrap();
        let third = messages.iter().position(|m| m == "third").unwrap();
        assert!(first < second && second < third);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_output_does_not_truncate_the_stream() {
        let dir = tempfile::TempDir::new().unwrap();
        // A raw 0xFF between two good lines; everything must come through
        let app = script(&dir, "echo before\nprintf '\\377\\n'\necho after\n");
        let sink = MemorySink::new();

        let result = Runner::run(&app, Path::new("/nonexistent"), &sink)
            .await
            .unwrap();

        assert!(result.success);
        assert!(sink.contains("before"));
        assert!(sink.contains("after"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_warns_but_is_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = script(&dir, "echo 'went sideways' >&2\nexit 3\n");
        let sink = MemorySink::new();

        let result = Runner::run(&app, Path::new("/nonexistent"), &sink)
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stderr, "went sideways");
        assert!(sink
            .records()
            .iter()
            .any(|r| r.severity == Severity::Warn && r.message.contains("exit code 3")));
    }

    #[tokio::test]
    async fn test_unlaunchable_binary_is_an_execution_error() {
        let sink = MemorySink::new();
        let err = Runner::run(
            Path::new("/definitely/not/an/executable"),
            Path::new("/nonexistent"),
            &sink,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EngineError::Execution(_)));
    }
}
