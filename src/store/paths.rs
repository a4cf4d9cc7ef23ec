//! Backing-file path resolution.
//!
//! A store instance operates on one set of backing files, selected by a
//! [`Scope`]. Resolution is pure: no filesystem access, and the global docs
//! directory is passed in explicitly (it comes from `Config`, constructed
//! once at startup) rather than read from ambient state.

use std::path::{Path, PathBuf};

use super::RecordKind;

/// Selects which backing files a store operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The shared global docs directory.
    Global,
    /// A project root; files live under its `docs/` subdirectory.
    Project(PathBuf),
}

/// The resolved backing-file locations, one per record kind.
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// The ideas backlog file.
    pub ideas: PathBuf,
    /// The issues tracker file.
    pub issues: PathBuf,
    /// The decisions log file.
    pub decisions: PathBuf,
}

impl StorePaths {
    /// Resolves backing-file paths for a scope.
    ///
    /// `docs_dir` is the global docs directory and is only consulted for
    /// [`Scope::Global`].
    pub fn resolve(scope: &Scope, docs_dir: &Path) -> Self {
        match scope {
            Scope::Global => Self {
                ideas: docs_dir.join("IDEAS-BACKLOG.md"),
                issues: docs_dir.join("ISSUES-TRACKER.md"),
                decisions: docs_dir.join("DECISIONS-LOG.md"),
            },
            Scope::Project(root) => {
                let docs = root.join("docs");
                Self {
                    ideas: docs.join("ideas.md"),
                    issues: docs.join("issues.md"),
                    decisions: docs.join("decisions.md"),
                }
            }
        }
    }

    /// The backing file for a record kind.
    pub fn for_kind(&self, kind: RecordKind) -> &Path {
        match kind {
            RecordKind::Ideas => &self.ideas,
            RecordKind::Issues => &self.issues,
            RecordKind::Decisions => &self.decisions,
        }
    }

    /// All backing files with their kinds, in kind order.
    pub fn all(&self) -> [(RecordKind, &Path); 3] {
        [
            (RecordKind::Ideas, self.ideas.as_path()),
            (RecordKind::Issues, self.issues.as_path()),
            (RecordKind::Decisions, self.decisions.as_path()),
        ]
    }
}
