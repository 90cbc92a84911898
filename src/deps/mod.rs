//! Mapping of include references to installable packages and link flags

pub mod catalog;
pub mod installer;

pub use catalog::{link_flags_for, resolve_packages};
pub use installer::install_all;
