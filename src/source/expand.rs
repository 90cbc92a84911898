//! Expands caller-supplied paths into a concrete list of source files

use super::{Language, SourceFile};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Fatal conditions detected while expanding the source set.
///
/// Both halt the pipeline before any external process is invoked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("No valid source files found")]
    NoSourceFiles,

    #[error("File not found: {0}")]
    MissingFile(PathBuf),
}

/// Turns a list of files and directories into a deduplicated, order-stable
/// list of absolute source file paths.
///
/// Directories recurse; files with unrecognized extensions inside them are
/// skipped silently. Directory entries are visited in sorted order so the
/// result does not depend on on-disk ordering. An explicitly supplied path
/// that exists neither as a file nor as a directory is fatal.
pub fn expand_sources(inputs: &[PathBuf]) -> Result<Vec<SourceFile>, ExpandError> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(language) = Language::from_path(entry.path()) {
                    push_unique(&mut files, &mut seen, entry.path(), language);
                }
            }
        } else if input.is_file() {
            match Language::from_path(input) {
                Some(language) => push_unique(&mut files, &mut seen, input, language),
                None => debug!(path = %input.display(), "Skipping unrecognized extension"),
            }
        } else {
            return Err(ExpandError::MissingFile(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(ExpandError::NoSourceFiles);
    }
    Ok(files)
}

fn push_unique(
    files: &mut Vec<SourceFile>,
    seen: &mut HashSet<PathBuf>,
    path: &Path,
    language: Language,
) {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if seen.insert(absolute.clone()) {
        files.push(SourceFile::new(absolute, language));
    }
}
