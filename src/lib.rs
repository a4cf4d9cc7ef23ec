//! govlog - governance capture for shared markdown logs
//!
//! govlog extracts governance items (ideas, issues, decisions, lessons,
//! tasks) from free-form text with a deterministic pattern classifier and
//! records them in shared, human-editable markdown logs with collision-free
//! IDs and crash-safe, lock-serialized inserts.

pub mod analyzer;
pub mod capture;
pub mod config;
pub mod store;
