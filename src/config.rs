//! Configuration for cforge
//!
//! Settings load from environment variables with sensible defaults; nothing
//! is required. One config value describes one engine instance: its output
//! directory, its home directory for bundled tools, and the single platform
//! triplet all package installs target.
//!
//! # Environment Variables
//!
//! - `CFORGE_OUT_DIR`: output directory for objects and executables - default: "out"
//! - `CFORGE_HOME`: root for the bundled toolchain and the vcpkg checkout -
//!   default: the per-user data directory + "cforge"
//! - `CFORGE_TRIPLET`: vcpkg platform triplet - default chosen per target OS
//! - `CFORGE_LOG_LEVEL`: logging level - default: "warn" (read in `main`)

use std::env;
use std::path::PathBuf;

const DEFAULT_OUT_DIR: &str = "out";

fn default_triplet() -> &'static str {
    if cfg!(windows) {
        "x64-mingw-dynamic"
    } else if cfg!(target_os = "macos") {
        "x64-osx"
    } else {
        "x64-linux"
    }
}

fn default_home() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cforge")
}

/// Engine configuration, immutable for the lifetime of a [`crate::BuildEngine`]
#[derive(Debug, Clone)]
pub struct CforgeConfig {
    /// Directory holding object files and the linked executable
    pub out_dir: PathBuf,

    /// Root directory for internally managed tools
    pub home: PathBuf,

    /// Fixed vcpkg triplet for this engine instance
    pub triplet: String,
}

impl Default for CforgeConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CforgeConfig {
    /// Loads configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let out_dir = env::var("CFORGE_OUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUT_DIR));
        let home = env::var("CFORGE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home());
        let triplet =
            env::var("CFORGE_TRIPLET").unwrap_or_else(|_| default_triplet().to_string());

        Self {
            out_dir,
            home,
            triplet,
        }
    }

    /// vcpkg checkout location under the home directory
    pub fn vcpkg_root(&self) -> PathBuf {
        self.home.join("vcpkg")
    }

    /// Bundled compiler toolchain location under the home directory
    pub fn toolchain_root(&self) -> PathBuf {
        self.home.join("toolchain")
    }
}
