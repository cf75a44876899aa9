//! File System Module
//!
//! The in-memory tree the shell operates on:
//! - `types`: node model and errors
//! - `path`: normalization helpers
//! - `vfs`: the tree and its operations
//! - `snapshot`: JSON snapshot and restore

pub mod path;
pub mod snapshot;
pub mod types;
pub mod vfs;

pub use snapshot::Snapshot;
pub use types::*;
pub use vfs::{Vfs, DEFAULT_HOME};
