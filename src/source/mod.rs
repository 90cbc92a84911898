//! Source file discovery and dependency scanning

pub mod expand;
pub mod includes;

pub use expand::{expand_sources, ExpandError};
pub use includes::scan_includes;

use std::path::{Path, PathBuf};

/// Language of a source file, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    /// Infers the language from a file extension, case-insensitive.
    ///
    /// Returns `None` for anything outside the recognized `.c`/`.cpp`
    /// families; such files are never part of a build.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "c" => Some(Language::C),
            "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            _ => None,
        }
    }
}

/// One discovered source file. Immutable once discovered; its mtime is
/// re-read from disk whenever staleness is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
}

impl SourceFile {
    pub fn new(path: PathBuf, language: Language) -> Self {
        Self { path, language }
    }

    /// Base name used in log messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Base name without extension; names the object file and, for the
    /// primary source file, the executable
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name())
    }
}
