//! Static header-to-package and package-to-link-flag tables
//!
//! Both tables are read-only domain data loaded once per process. They are
//! extended by adding entries, not by adding code paths. Lookups are exact:
//! a reference that is not a table entry is discarded, which keeps standard
//! library and project-local headers from triggering spurious installs at
//! the cost of missing packages whose headers are not listed.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Maps a header path, as written in an `#include` directive, to the vcpkg
/// package that provides it. Non-exhaustive by design.
static HEADER_PACKAGES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("nlohmann/json.hpp", "nlohmann-json"),
        ("fmt/core.h", "fmt"),
        ("fmt/format.h", "fmt"),
        ("spdlog/spdlog.h", "spdlog"),
        ("sqlite3.h", "sqlite3"),
        ("curl/curl.h", "curl"),
        ("gtest/gtest.h", "gtest"),
        ("GL/glew.h", "glew"),
        ("GLFW/glfw3.h", "glfw3"),
        ("glm/glm.hpp", "glm"),
        ("zlib.h", "zlib"),
        ("openssl/ssl.h", "openssl"),
        // Boost is modular in vcpkg
        ("boost/asio.hpp", "boost-asio"),
    ])
});

/// Link flag policy per package. `None` marks a header-only package that
/// contributes nothing to the link line. Packages absent from this table
/// get the generic `-l<package>` derived from their identifier.
static LINK_FLAGS: LazyLock<HashMap<&'static str, Option<&'static str>>> = LazyLock::new(|| {
    HashMap::from([
        ("nlohmann-json", None),
        ("glm", None),
        ("boost-asio", None),
        ("fmt", Some("-lfmt")),
        ("sqlite3", Some("-lsqlite3")),
        ("curl", Some("-lcurl")),
    ])
});

/// Resolves the union of scanned include references to the set of required
/// packages. Pure function of its input and the static table; unmatched
/// references are silently ignored.
pub fn resolve_packages(references: &BTreeSet<String>) -> BTreeSet<String> {
    references
        .iter()
        .filter_map(|reference| HEADER_PACKAGES.get(reference.as_str()))
        .map(|package| package.to_string())
        .collect()
}

/// Returns the link flag for a package, or `None` for header-only packages
pub fn link_flags_for(package: &str) -> Option<String> {
    match LINK_FLAGS.get(package) {
        Some(None) => None,
        Some(Some(flag)) => Some(flag.to_string()),
        None => Some(format!("-l{package}")),
    }
}
