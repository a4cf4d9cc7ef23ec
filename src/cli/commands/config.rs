//! Config command - show resolved configuration.
//!
//! Prints where configuration is read from and the values currently in
//! effect, including the resolved backing-file paths.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::store::{Scope, StorePaths};

/// Arguments for the config command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog config    Show the config file path and resolved values")]
pub struct Args {}

/// Executes the config command.
pub fn run(_args: Args) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let docs_dir = config.docs_dir()?;
    let paths = StorePaths::resolve(&Scope::Global, &docs_dir);

    println!("{}", "Govlog Configuration".bold());
    println!();

    let config_present = if config_path.exists() {
        "".to_string()
    } else {
        " (not present, using defaults)".dimmed().to_string()
    };
    println!(
        "  {}  {}{}",
        "Config file:".dimmed(),
        config_path.display(),
        config_present
    );
    println!("  {}    {}", "Docs dir:".dimmed(), docs_dir.display());
    println!("  {}   {}", "Threshold:".dimmed(), config.threshold());

    println!();
    println!("{}", "Backing files:".bold());
    for (kind, path) in paths.all() {
        let marker = if path.exists() {
            "✓".green()
        } else {
            "○".dimmed()
        };
        println!("  {} {:10} {}", marker, kind.to_string(), path.display());
    }

    Ok(())
}
