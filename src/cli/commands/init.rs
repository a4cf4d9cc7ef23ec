//! Init command - create the backing files with starter content.
//!
//! Creates each missing backing file with its metadata header and section
//! anchor. Existing files are left untouched.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

/// Arguments for the init command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog init                Create the global backing files\n    \
    govlog init --project .    Create docs/{ideas,issues,decisions}.md here")]
pub struct Args {
    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

/// Executes the init command.
pub fn run(args: Args) -> Result<()> {
    let (store, _config) = super::open_store(args.project)?;

    for (kind, path) in store.paths().all() {
        if store.init_file(kind)? {
            println!("{} Created {}", "✓".green(), path.display());
        } else {
            println!("{} {} already exists", "○".dimmed(), path.display());
        }
    }

    Ok(())
}
