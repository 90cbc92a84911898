//! Fail-fast installation of required packages through the package store

use crate::engine::EngineError;
use crate::progress::LogSink;
use crate::store::PackageStore;
use std::collections::BTreeSet;
use tracing::debug;

/// Installs every required package, in deterministic order, through the
/// store. The first failure aborts the run; later packages are not
/// attempted. Retries, if any, belong to the external store.
pub async fn install_all(
    store: &dyn PackageStore,
    packages: &BTreeSet<String>,
    sink: &dyn LogSink,
) -> Result<(), EngineError> {
    for package in packages {
        debug!(package = %package, triplet = store.triplet(), "Installing dependency");
        if let Err(err) = store.install(package, sink).await {
            sink.error(&format!("{err:#}"));
            return Err(EngineError::DependencyInstall(package.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemorySink;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct ScriptedStore {
        fail_on: Option<String>,
        installed: Mutex<Vec<String>>,
    }

    impl ScriptedStore {
        fn new(fail_on: Option<&str>) -> Self {
            Self {
                fail_on: fail_on.map(String::from),
                installed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PackageStore for ScriptedStore {
        fn is_installed(&self) -> bool {
            true
        }

        fn triplet(&self) -> &str {
            "x64-test"
        }

        fn include_dir(&self) -> PathBuf {
            PathBuf::from("/nonexistent/include")
        }

        fn lib_dir(&self) -> PathBuf {
            PathBuf::from("/nonexistent/lib")
        }

        fn bin_dir(&self) -> PathBuf {
            PathBuf::from("/nonexistent/bin")
        }

        async fn install(&self, package: &str, _sink: &dyn LogSink) -> Result<()> {
            if self.fail_on.as_deref() == Some(package) {
                bail!("Failed to install {package}");
            }
            self.installed.lock().unwrap().push(package.to_string());
            Ok(())
        }
    }

    fn packages(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_installs_every_package() {
        let store = ScriptedStore::new(None);
        let sink = MemorySink::new();

        install_all(&store, &packages(&["curl", "fmt"]), &sink)
            .await
            .unwrap();

        assert_eq!(*store.installed.lock().unwrap(), vec!["curl", "fmt"]);
    }

    #[tokio::test]
    async fn test_first_failure_stops_later_installs() {
        let store = ScriptedStore::new(Some("fmt"));
        let sink = MemorySink::new();

        let err = install_all(&store, &packages(&["curl", "fmt", "zlib"]), &sink)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::DependencyInstall(p) if p == "fmt"));
        // curl sorts before fmt and was installed; zlib was never attempted
        assert_eq!(*store.installed.lock().unwrap(), vec!["curl"]);
        assert!(sink.contains("Failed to install fmt"));
    }

    #[tokio::test]
    async fn test_empty_set_is_a_no_op() {
        let store = ScriptedStore::new(None);
        let sink = MemorySink::new();

        install_all(&store, &BTreeSet::new(), &sink).await.unwrap();
        assert!(store.installed.lock().unwrap().is_empty());
    }
}
