//! Resolved tool environment threaded through the pipeline
//!
//! Toolchain discovery produces an explicit [`ToolEnvironment`] value that
//! every later stage reads and none mutate. Process-wide `PATH` is never
//! modified; extra search roots ride along in the value and are applied per
//! spawned command.

use crate::source::Language;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Compiler family resolved for one orchestration run. The same family is
/// used for every compile and link invocation of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerFamily {
    Clang,
    Gnu,
}

impl CompilerFamily {
    pub fn c_compiler(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "clang",
            CompilerFamily::Gnu => "gcc",
        }
    }

    pub fn cpp_compiler(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "clang++",
            CompilerFamily::Gnu => "g++",
        }
    }
}

/// Resolved compiler paths plus extra search roots for spawned tools
#[derive(Debug, Clone)]
pub struct ToolEnvironment {
    pub cc: PathBuf,
    pub cxx: PathBuf,
    pub family: CompilerFamily,
    /// Prepended to `PATH` for every subprocess this run spawns, so a
    /// bundled toolchain or a bundled git resolve their own helpers
    pub extra_paths: Vec<PathBuf>,
}

impl ToolEnvironment {
    pub fn compiler_for(&self, language: Language) -> &Path {
        match language {
            Language::C => &self.cc,
            Language::Cpp => &self.cxx,
        }
    }

    /// `PATH` value with the extra search roots prepended, or `None` when
    /// there is nothing to prepend and the inherited value can be used
    pub fn search_path(&self) -> Option<OsString> {
        if self.extra_paths.is_empty() {
            return None;
        }
        let inherited = env::var_os("PATH").unwrap_or_default();
        let combined = self
            .extra_paths
            .iter()
            .cloned()
            .chain(env::split_paths(&inherited));
        env::join_paths(combined).ok()
    }
}

/// Looks a binary up on the process `PATH`, like `which`
pub fn locate_on_path(name: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    for dir in env::split_paths(&path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(executable_name(name));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn executable_name(name: &str) -> String {
    if cfg!(windows) && !name.ends_with(".exe") {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn fake_env(extra: Vec<PathBuf>) -> ToolEnvironment {
        ToolEnvironment {
            cc: PathBuf::from("/usr/bin/clang"),
            cxx: PathBuf::from("/usr/bin/clang++"),
            family: CompilerFamily::Clang,
            extra_paths: extra,
        }
    }

    #[test]
    fn test_compiler_for_language() {
        let env = fake_env(vec![]);
        assert_eq!(env.compiler_for(Language::C), Path::new("/usr/bin/clang"));
        assert_eq!(
            env.compiler_for(Language::Cpp),
            Path::new("/usr/bin/clang++")
        );
    }

    #[test]
    fn test_family_binary_names() {
        assert_eq!(CompilerFamily::Clang.c_compiler(), "clang");
        assert_eq!(CompilerFamily::Clang.cpp_compiler(), "clang++");
        assert_eq!(CompilerFamily::Gnu.c_compiler(), "gcc");
        assert_eq!(CompilerFamily::Gnu.cpp_compiler(), "g++");
    }

    #[test]
    fn test_no_extras_means_inherited_path() {
        assert!(fake_env(vec![]).search_path().is_none());
    }

    #[test]
    fn test_extras_come_first_in_search_path() {
        let env = fake_env(vec![PathBuf::from("/opt/bundled/bin")]);
        let path = env.search_path().unwrap();
        let first = std::env::split_paths(&path).next().unwrap();
        assert_eq!(first, PathBuf::from("/opt/bundled/bin"));
    }

    #[test]
    #[serial]
    fn test_locate_on_path_finds_real_file() {
        let dir = TempDir::new().unwrap();
        let name = if cfg!(windows) { "frobnicate.exe" } else { "frobnicate" };
        fs::write(dir.path().join(name), b"").unwrap();

        let original = std::env::var_os("PATH");
        let mut paths: Vec<PathBuf> = vec![dir.path().to_path_buf()];
        if let Some(orig) = &original {
            paths.extend(std::env::split_paths(orig));
        }
        std::env::set_var("PATH", std::env::join_paths(paths).unwrap());

        let found = locate_on_path("frobnicate");
        let missing = locate_on_path("definitely-not-a-tool-xyz");

        match original {
            Some(orig) => std::env::set_var("PATH", orig),
            None => std::env::remove_var("PATH"),
        }

        assert_eq!(found, Some(dir.path().join(name)));
        assert_eq!(missing, None);
    }
}
