//! Best-effort `#include` directive scanning
//!
//! This is a deliberately narrow, line-oriented scan rather than a real
//! preprocessor. Known false negatives: multiline directives and
//! macro-generated includes are not seen, and only the first directive per
//! line is captured.

use crate::progress::LogSink;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#include\s*[<"]([^>"]+)[>"]"#).unwrap());

/// Scans one file for `#include <...>` / `#include "..."` directives and
/// returns the set of referenced paths as written.
///
/// An unreadable file produces a warning and an empty set; a single bad file
/// must not stop analysis of the rest of the source set.
pub fn scan_includes(path: &Path, sink: &dyn LogSink) -> BTreeSet<String> {
    let mut references = BTreeSet::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            sink.warn(&format!("Could not read {}: {}", path.display(), err));
            return references;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                sink.warn(&format!("Could not read {}: {}", path.display(), err));
                break;
            }
        };
        if let Some(captures) = INCLUDE_RE.captures(&line) {
            references.insert(captures[1].to_string());
        }
    }

    references
}
