//! File System Types
//!
//! Node model and error types for the virtual file system.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EEXIST: file already exists, {operation} '{path}'")]
    AlreadyExists { path: String, operation: String },

    #[error("ENOTDIR: not a directory, {operation} '{path}'")]
    NotADirectory { path: String, operation: String },

    #[error("EISDIR: illegal operation on a directory, {operation} '{path}'")]
    IsADirectory { path: String, operation: String },

    #[error("ENOTEMPTY: directory not empty, {operation} '{path}'")]
    NotEmpty { path: String, operation: String },

    #[error("EINVAL: invalid argument, {operation} '{path}'")]
    InvalidArgument { path: String, operation: String },
}

impl VfsError {
    pub(crate) fn not_found(path: &str, operation: &str) -> Self {
        VfsError::NotFound { path: path.to_string(), operation: operation.to_string() }
    }

    pub(crate) fn already_exists(path: &str, operation: &str) -> Self {
        VfsError::AlreadyExists { path: path.to_string(), operation: operation.to_string() }
    }

    pub(crate) fn not_a_directory(path: &str, operation: &str) -> Self {
        VfsError::NotADirectory { path: path.to_string(), operation: operation.to_string() }
    }

    pub(crate) fn is_a_directory(path: &str, operation: &str) -> Self {
        VfsError::IsADirectory { path: path.to_string(), operation: operation.to_string() }
    }

    pub(crate) fn not_empty(path: &str, operation: &str) -> Self {
        VfsError::NotEmpty { path: path.to_string(), operation: operation.to_string() }
    }

    pub(crate) fn invalid(path: &str, operation: &str) -> Self {
        VfsError::InvalidArgument { path: path.to_string(), operation: operation.to_string() }
    }

    /// Short user-facing reason, as printed by command handlers.
    pub fn reason(&self) -> &'static str {
        match self {
            VfsError::NotFound { .. } => "No such file or directory",
            VfsError::AlreadyExists { .. } => "File exists",
            VfsError::NotADirectory { .. } => "Not a directory",
            VfsError::IsADirectory { .. } => "Is a directory",
            VfsError::NotEmpty { .. } => "Directory not empty",
            VfsError::InvalidArgument { .. } => "Invalid argument",
        }
    }

    /// The absolute path the failed operation was applied to.
    pub fn path(&self) -> &str {
        match self {
            VfsError::NotFound { path, .. }
            | VfsError::AlreadyExists { path, .. }
            | VfsError::NotADirectory { path, .. }
            | VfsError::IsADirectory { path, .. }
            | VfsError::NotEmpty { path, .. }
            | VfsError::InvalidArgument { path, .. } => path,
        }
    }
}

/// Snapshot decoding errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),
}

/// What a file's content payload represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Text,
    Image,
    Audio,
    #[serde(rename = "exe")]
    Executable,
}

impl FileType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "image" | "img" => Some(Self::Image),
            "audio" => Some(Self::Audio),
            "exe" | "executable" => Some(Self::Executable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Text => "text",
            FileType::Image => "image",
            FileType::Audio => "audio",
            FileType::Executable => "exe",
        }
    }

    /// Default permission bits for a freshly written file of this type.
    pub fn default_mode(&self) -> u32 {
        match self {
            FileType::Executable => 0o755,
            _ => 0o644,
        }
    }
}

/// A file leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub name: String,
    pub content: String,
    pub file_type: FileType,
    pub mode: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub modified_at: DateTime<Utc>,
}

impl File {
    pub fn new(name: &str, content: &str, file_type: FileType) -> Self {
        let now = Utc::now();
        File {
            name: name.to_string(),
            content: content.to_string(),
            file_type,
            mode: file_type.default_mode(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// A directory; children are keyed by their own name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Directory {
    pub name: String,
    pub children: BTreeMap<String, Node>,
}

impl Directory {
    pub fn new(name: &str) -> Self {
        Directory { name: name.to_string(), children: BTreeMap::new() }
    }
}

/// A node in the tree. The serialized form is the snapshot `TreeNode`:
/// `{kind:"dir", name, children}` or `{kind:"file", name, content, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Node {
    #[serde(rename = "dir")]
    Directory(Directory),
    #[serde(rename = "file")]
    File(File),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(d) => &d.name,
            Node::File(f) => &f.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        match self {
            Node::Directory(d) => d.name = name.to_string(),
            Node::File(f) => f.name = name.to_string(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Node::File(f) => Some(f),
            Node::Directory(_) => None,
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        match self {
            Node::File(_) => 1,
            Node::Directory(d) => 1 + d.children.values().map(Node::count).sum::<usize>(),
        }
    }
}

/// Kind filter for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// File status information
#[derive(Debug, Clone, PartialEq)]
pub struct FileStat {
    pub kind: NodeKind,
    pub size: u64,
    pub file_type: Option<FileType>,
    pub mode: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Tests
// ============================================================================
