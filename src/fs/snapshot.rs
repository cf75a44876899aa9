//! Snapshot serialization
//!
//! The persisted form of a [`Vfs`]: `{ root, cwd, homePath }`.

use serde::{Deserialize, Serialize};

use super::path;
use super::types::{Node, SnapshotError};
use super::vfs::Vfs;

/// Full tree plus cursor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub root: Node,
    pub cwd: String,
    pub home_path: String,
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

/// Every child must be keyed by its own, well-formed name.
fn check_tree(node: &Node, at: &str) -> Result<(), SnapshotError> {
    if let Node::Directory(d) = node {
        for (key, c) in &d.children {
            if !valid_name(key) {
                return Err(SnapshotError::Corrupt(format!("invalid entry name '{}' in {}", key, at)));
            }
            if c.name() != key {
                return Err(SnapshotError::Corrupt(format!(
                    "entry '{}' in {} is named '{}'",
                    key,
                    at,
                    c.name()
                )));
            }
            check_tree(c, &path::child(at, key))?;
        }
    }
    Ok(())
}

impl Vfs {
    /// Capture the whole file system.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            root: self.root().clone(),
            cwd: self.cwd().to_string(),
            home_path: self.home().to_string(),
        }
    }

    /// Rebuild a file system from a snapshot.
    ///
    /// A cwd that no longer names a directory falls back to its deepest
    /// existing ancestor.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        if !snapshot.root.is_directory() {
            return Err(SnapshotError::Corrupt("root is not a directory".to_string()));
        }
        if !snapshot.home_path.starts_with('/') || !snapshot.cwd.starts_with('/') {
            return Err(SnapshotError::Corrupt("cwd and homePath must be absolute".to_string()));
        }
        check_tree(&snapshot.root, "/")?;

        let home = path::normalize(&snapshot.home_path, "/", "/");
        let cwd = path::normalize(&snapshot.cwd, "/", &home);
        let mut root = snapshot.root;
        root.set_name("/");
        Ok(Vfs::from_parts(root, cwd, home))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

// ============================================================================
// Tests
// ============================================================================
