//! Command-line interface for govlog.
//!
//! Thin command handlers over the library: argument parsing and
//! presentation only, with the classification and store logic living in
//! `analyzer`, `store`, and `capture`.

/// Individual CLI command implementations.
pub mod commands;

/// Output format handling shared across commands.
pub mod format;
