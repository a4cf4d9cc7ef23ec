//! Next-id command - print the next available record ID.
//!
//! Scans the backing file for every existing ID of the family and prints
//! the one after the highest. Note that allocating here and inserting in
//! a later invocation is not atomic; colliding inserts are rejected at
//! insert time.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;

use crate::store::RecordKind;

/// Record families addressable from the CLI.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Kind {
    /// Ideas backlog (IDEA-NNN)
    Ideas,
    /// Issues tracker (ISSUE-NNN)
    Issues,
    /// Decisions log (DEC-NNN)
    Decisions,
}

impl From<Kind> for RecordKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Ideas => RecordKind::Ideas,
            Kind::Issues => RecordKind::Issues,
            Kind::Decisions => RecordKind::Decisions,
        }
    }
}

/// Arguments for the next-id command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog next-id ideas\n    \
    govlog next-id issues --project .")]
pub struct Args {
    /// Record family to allocate from
    #[arg(value_enum, value_name = "KIND")]
    pub kind: Kind,

    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

/// Executes the next-id command.
pub fn run(args: Args) -> Result<()> {
    let (store, _config) = super::open_store(args.project)?;
    let id = store.next_id(args.kind.into())?;
    println!("{id}");
    Ok(())
}
