use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod analyzer;
mod capture;
mod cli;
mod config;
mod store;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "govlog")]
#[command(version)]
#[command(about = "Governance capture - turn working notes into tracked ideas, issues, and decisions")]
#[command(long_about = "Govlog classifies free-form text into governance items (issues, ideas,\n\
    decisions, lessons, tasks) using weighted signal matching, and records\n\
    them as markdown blocks in shared backlog files with sequential IDs.\n\n\
    Records are inserted under an exclusive lock and written atomically,\n\
    so concurrent captures never corrupt the backing files.")]
#[command(after_help = "EXAMPLES:\n    \
    govlog init                            Create the backing files\n    \
    govlog analyze \"the deploy is broken\"  Classify text without recording\n    \
    govlog capture issue \"deploy broken\"   Record an issue\n    \
    govlog next-id ideas                   Show the next free IDEA ID\n    \
    govlog check-id ISSUE-007              Test whether an ID is taken\n\n\
    For more information about a command, run 'govlog <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Classify text into governance items without recording anything
    #[command(long_about = "Runs the signal-based classifier over the given text (or stdin) and\n\
        prints the detected items. Use --present for the full view with\n\
        suggested categories, priorities, and explanations, or --format json\n\
        for machine-readable output.")]
    Analyze(commands::analyze::Args),

    /// Record an idea, issue, or decision in the backing files
    #[command(long_about = "Allocates the next sequential ID for the record family and splices a\n\
        markdown block into the backing file. Field values can be supplied\n\
        with flags; sensible defaults fill the rest.")]
    Capture(commands::capture::Args),

    /// Print the next available record ID for a family
    #[command(name = "next-id")]
    NextId(commands::next_id::Args),

    /// Check whether a record ID already exists
    #[command(name = "check-id")]
    #[command(long_about = "Infers the record family from the ID prefix and reports whether the\n\
        ID appears in the backing file. Exits non-zero when it does.")]
    CheckId(commands::check_id::Args),

    /// Create the backing files with starter content
    Init(commands::init::Args),

    /// Show the resolved configuration and backing-file paths
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "govlog=debug"
    } else {
        "govlog=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args)?,
        Commands::Capture(args) => commands::capture::run(args)?,
        Commands::NextId(args) => commands::next_id::run(args)?,
        Commands::CheckId(args) => return commands::check_id::run(args),
        Commands::Init(args) => commands::init::run(args)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            commands::completions::generate_completions(&mut cmd, args.shell);
        }
    }

    Ok(ExitCode::SUCCESS)
}
