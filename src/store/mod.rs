//! External package store boundary
//!
//! The engine consumes packages through the [`PackageStore`] trait; one
//! store instance serves one fixed platform triplet. The production
//! implementation drives vcpkg, tests substitute their own.

pub mod vcpkg;

pub use vcpkg::VcpkgStore;

use crate::progress::LogSink;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait PackageStore: Send + Sync {
    /// Whether the store itself is usable at all
    fn is_installed(&self) -> bool;

    /// The platform triplet every install targets
    fn triplet(&self) -> &str;

    /// Header directory of the installed tree (may not exist yet)
    fn include_dir(&self) -> PathBuf;

    /// Library directory of the installed tree (may not exist yet)
    fn lib_dir(&self) -> PathBuf;

    /// Runtime binary directory of the installed tree (may not exist yet)
    fn bin_dir(&self) -> PathBuf;

    /// Ensures `package` is installed for the triplet, streaming any live
    /// installer output line-by-line into the sink. Blocking from the
    /// pipeline's point of view; returns `Err` on failure.
    async fn install(&self, package: &str, sink: &dyn LogSink) -> Result<()>;
}
