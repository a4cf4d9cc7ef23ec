//! Concurrency-safe record store over shared markdown logs.
//!
//! The backing files are the sole source of truth: every ID allocation and
//! insert re-reads the file under an exclusive advisory lock, and nothing is
//! cached across calls. Mutation happens only here, and only as a
//! lock-scoped read-modify-write with an atomic replace at the end.

pub mod atomic;
pub mod editor;
pub mod lock;
pub mod models;
pub mod paths;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use editor::Store;
pub use lock::FileLock;
pub use models::{starter_content, DecisionFields, IdeaFields, IssueFields};
pub use paths::{Scope, StorePaths};

/// The persisted record families and their backing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Ideas,
    Issues,
    Decisions,
}

impl RecordKind {
    /// Record ID prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::Ideas => "IDEA",
            RecordKind::Issues => "ISSUE",
            RecordKind::Decisions => "DEC",
        }
    }

    /// The section anchor that new records are spliced after.
    pub fn anchor(self) -> &'static str {
        match self {
            RecordKind::Ideas => "## Active Ideas",
            RecordKind::Issues => "## Open Issues",
            RecordKind::Decisions => "## Decisions",
        }
    }

    /// Infers the kind from a record ID prefix, e.g. "IDEA-042".
    ///
    /// ISSUE is checked before IDEA so the shared leading "I" cannot
    /// misclassify.
    pub fn from_id(id: &str) -> Option<Self> {
        if id.starts_with("ISSUE-") {
            Some(RecordKind::Issues)
        } else if id.starts_with("IDEA-") {
            Some(RecordKind::Ideas)
        } else if id.starts_with("DEC-") {
            Some(RecordKind::Decisions)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Ideas => write!(f, "ideas"),
            RecordKind::Issues => write!(f, "issues"),
            RecordKind::Decisions => write!(f, "decisions"),
        }
    }
}

/// Errors from store operations.
///
/// Collisions and malformed files carry the failing identifier or anchor,
/// since the failure tells the caller what to do next: retry with a fresh
/// ID, or go look at the file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("governance file not found: {0}")]
    NotFound(PathBuf),

    /// The backing file could not be read due to permissions.
    #[error("permission denied reading {path}: {source}")]
    Permission {
        /// The backing file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The backing file is not valid UTF-8.
    #[error("encoding error in {0}: not valid UTF-8")]
    Encoding(PathBuf),

    /// The expected section anchor is missing; treated as corruption and
    /// nothing is written.
    #[error("malformed file {path}: '{anchor}' header not found")]
    MalformedFile {
        /// The backing file.
        path: PathBuf,
        /// The anchor that was expected.
        anchor: String,
    },

    /// The identifier already exists in the backing file. The caller must
    /// request a fresh ID and retry.
    #[error("ID already exists: {0}")]
    IdCollision(String),

    /// Any other I/O fault, including failures during the atomic replace.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The backing file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
