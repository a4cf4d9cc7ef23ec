//! CLI commands for govlog.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Analyze text for governance items.
pub mod analyze;

/// Capture a record into the governance logs.
pub mod capture;

/// Check whether a record ID already exists.
pub mod check_id;

/// Generate shell completion scripts.
pub mod completions;

/// Show resolved configuration and backing-file paths.
pub mod config;

/// Create backing files with starter content.
pub mod init;

/// Print the next available record ID.
pub mod next_id;

use std::path::PathBuf;

use crate::config::Config;
use crate::store::{Scope, Store, StorePaths};

/// Builds a store for either the global scope or a project root.
///
/// Configuration is loaded exactly once here and handed back alongside the
/// store, so commands that also need config values (threshold, paths) never
/// read the config file a second time.
pub(crate) fn open_store(project: Option<PathBuf>) -> anyhow::Result<(Store, Config)> {
    let config = Config::load()?;
    let scope = match project {
        Some(root) => Scope::Project(root),
        None => Scope::Global,
    };
    let paths = StorePaths::resolve(&scope, &config.docs_dir()?);
    Ok((Store::new(paths), config))
}
