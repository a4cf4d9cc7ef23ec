//! Check-id command - test whether a record ID is already taken.
//!
//! The record family is inferred from the ID prefix. Exits non-zero when
//! the ID exists, so the command composes into shell conditionals.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use crate::store::RecordKind;

/// Arguments for the check-id command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog check-id IDEA-042\n    \
    govlog check-id ISSUE-007 --project .")]
pub struct Args {
    /// Record ID to check, e.g. IDEA-042, ISSUE-007, or DEC-003
    #[arg(value_name = "ID")]
    pub id: String,

    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

/// Executes the check-id command.
pub fn run(args: Args) -> Result<ExitCode> {
    let Some(kind) = RecordKind::from_id(&args.id) else {
        anyhow::bail!(
            "Unrecognized ID '{}': expected an IDEA-, ISSUE-, or DEC- prefix",
            args.id
        );
    };

    let (store, _config) = super::open_store(args.project)?;

    if store.id_exists(kind, &args.id) {
        println!("{} {} already exists", "EXISTS:".red(), args.id.bold());
        Ok(ExitCode::FAILURE)
    } else {
        println!("{} {} is free to use", "AVAILABLE:".green(), args.id.bold());
        Ok(ExitCode::SUCCESS)
    }
}
