//! Configuration management.
//!
//! Configuration lives in `~/.govlog/config.yaml` and is loaded once at
//! startup; the resolved values are passed explicitly into the store rather
//! than read from ambient state. Environment variables override the file:
//! `GOVLOG_DOCS_DIR` overrides `docs_dir`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// User configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory holding the global backing files. Defaults to
    /// `~/dev/infrastructure/dev-env-docs`.
    pub docs_dir: Option<PathBuf>,

    /// Analyzer detection threshold override.
    pub threshold: Option<u32>,
}

impl Config {
    /// Loads configuration from the config file, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Could not parse config file {}", path.display()))?;
        Ok(config)
    }

    /// The config file path: `~/.govlog/config.yaml`.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .context("Could not find home directory")?
            .join(".govlog");

        Ok(config_dir.join("config.yaml"))
    }

    /// Resolves the global docs directory.
    ///
    /// Precedence: `GOVLOG_DOCS_DIR` env var, then the config file, then
    /// the conventional default under the home directory.
    pub fn docs_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = env::var_os("GOVLOG_DOCS_DIR") {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.docs_dir {
            return Ok(dir.clone());
        }

        Ok(dirs::home_dir()
            .context("Could not find home directory")?
            .join("dev/infrastructure/dev-env-docs"))
    }

    /// The analyzer threshold, defaulting when unset.
    pub fn threshold(&self) -> u32 {
        self.threshold
            .unwrap_or(crate::analyzer::DEFAULT_THRESHOLD)
    }
}
