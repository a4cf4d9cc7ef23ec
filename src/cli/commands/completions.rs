//! Completions command - generate shell completion scripts.
//!
//! Generates shell completion scripts that can be installed to enable
//! tab-completion of govlog commands and options.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog completions bash > ~/.local/share/bash-completion/completions/govlog\n    \
    govlog completions zsh > ~/.zfunc/_govlog\n    \
    govlog completions fish > ~/.config/fish/completions/govlog.fish")]
pub struct Args {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generates completions using a provided clap Command.
///
/// Called from main.rs, which has access to the Cli struct.
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, "govlog", &mut io::stdout());
}
