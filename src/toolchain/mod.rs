//! Compiler toolchain discovery

pub mod env;
pub mod provider;

pub use env::{locate_on_path, CompilerFamily, ToolEnvironment};
pub use provider::{SystemToolchain, ToolchainProvider};
