use crate::source::{Language, SourceFile};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Whether a prior object file can be reused for a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale,
}

/// One source file paired with its object file path and staleness verdict.
/// Recreated on every run; the object file on disk is the only durable
/// output.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub source: SourceFile,
    pub object: PathBuf,
    pub staleness: Staleness,
}

/// Everything the compile, link and run stages need, constructed once per
/// orchestration run and never mutated afterwards.
///
/// Invariant: `artifacts` corresponds one-to-one, in order, with the
/// expanded source list. The first entry is the primary source file that
/// names the executable.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub artifacts: Vec<CompiledArtifact>,
    pub packages: BTreeSet<String>,
    pub include_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub bin_dir: PathBuf,
}

impl BuildPlan {
    pub fn primary(&self) -> &CompiledArtifact {
        &self.artifacts[0]
    }

    /// Any C++ input forces the C++ linker driver
    pub fn uses_cpp(&self) -> bool {
        self.artifacts
            .iter()
            .any(|artifact| artifact.source.language == Language::Cpp)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(|artifact| artifact.object.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(name: &str, language: Language) -> CompiledArtifact {
        CompiledArtifact {
            source: SourceFile::new(PathBuf::from(format!("/src/{name}")), language),
            object: PathBuf::from(format!("/out/{name}.o")),
            staleness: Staleness::Stale,
        }
    }

    #[test]
    fn test_primary_is_first_in_source_order() {
        let plan = BuildPlan {
            artifacts: vec![artifact("main.cpp", Language::Cpp), artifact("util.c", Language::C)],
            packages: BTreeSet::new(),
            include_dir: PathBuf::new(),
            lib_dir: PathBuf::new(),
            bin_dir: PathBuf::new(),
        };
        assert_eq!(plan.primary().source.stem(), "main");
    }

    #[test]
    fn test_mixed_inputs_use_cpp_driver() {
        let plan = BuildPlan {
            artifacts: vec![artifact("util.c", Language::C), artifact("app.cpp", Language::Cpp)],
            packages: BTreeSet::new(),
            include_dir: PathBuf::new(),
            lib_dir: PathBuf::new(),
            bin_dir: PathBuf::new(),
        };
        assert!(plan.uses_cpp());
    }

    #[test]
    fn test_pure_c_inputs_use_c_driver() {
        let plan = BuildPlan {
            artifacts: vec![artifact("a.c", Language::C), artifact("b.c", Language::C)],
            packages: BTreeSet::new(),
            include_dir: PathBuf::new(),
            lib_dir: PathBuf::new(),
            bin_dir: PathBuf::new(),
        };
        assert!(!plan.uses_cpp());
    }
}
