//! Virtual File System
//!
//! A tree of [`Node`]s rooted at `/`. Nodes hold no parent pointers: ancestry
//! is derived from the path used to reach a node, and the current directory
//! is kept as a normalized absolute path that every mutation repairs.
//!
//! Every operation takes a possibly-relative path and normalizes it against
//! the current directory. Failures return a [`VfsError`] and leave the tree
//! exactly as it was.

use chrono::Utc;
use tracing::debug;

use super::path::{self, basename, child, dirname, is_within, segments};
use super::types::*;

/// Home directory used when none is configured.
pub const DEFAULT_HOME: &str = "/home/user";

const MOTD: &str = "Welcome to the Central Terminal!\n";
const GUIDE: &str = "# Welcome to the Virtual File System!\n\n\
Everything here lives in memory. Try `ls`, `cd`, `mkdir`, `edit notes.txt` or `help`.\n";
const README: &str = "This is a README file.\n";

/// In-memory hierarchical file system.
#[derive(Debug, Clone)]
pub struct Vfs {
    root: Node,
    cwd: String,
    home: String,
    generation: u64,
}

impl Vfs {
    /// Create a seeded file system with the default home directory.
    pub fn new() -> Self {
        Self::with_home(DEFAULT_HOME)
    }

    /// Create a seeded file system with the given home directory.
    pub fn with_home(home: &str) -> Self {
        let mut vfs = Self::empty(home);
        vfs.seed();
        vfs.cwd = if vfs.is_dir(&vfs.home) { vfs.home.clone() } else { "/".to_string() };
        vfs.generation = 0;
        vfs
    }

    /// Create a file system holding only the root directory.
    pub fn empty(home: &str) -> Self {
        Self {
            root: Node::Directory(Directory::new("/")),
            cwd: "/".to_string(),
            home: path::normalize(home, "/", "/"),
            generation: 0,
        }
    }

    fn seed(&mut self) {
        let home = self.home.clone();
        let _ = self.mkdir_recursive(&home);
        let _ = self.mkdir("/bin");
        let _ = self.mkdir("/etc");
        let _ = self.mkdir("/docs");
        let _ = self.mkdir("/tmp");
        let _ = self.write_file("/etc/motd", MOTD, FileType::Text, true);
        let _ = self.write_file("/docs/guide.txt", GUIDE, FileType::Text, true);
        let _ = self.write_file(&child(&home, "README.txt"), README, FileType::Text, true);
        let _ = self.write_file("/bin/edit", "editor", FileType::Executable, true);
        let _ = self.write_file("/bin/rps", "rps", FileType::Executable, true);
    }

    /// Replace the whole tree with a freshly seeded one.
    pub fn reset(&mut self) {
        let generation = self.generation;
        *self = Self::with_home(&self.home.clone());
        self.generation = generation + 1;
        debug!(home = %self.home, "filesystem reset");
    }

    pub(crate) fn from_parts(root: Node, cwd: String, home: String) -> Self {
        let mut vfs = Self { root, cwd, home, generation: 0 };
        vfs.repair_cwd();
        vfs
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Absolute path of the current working directory.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Counter bumped by every successful mutation, `chdir` included.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Normalize a possibly-relative path against the current directory.
    pub fn normalize(&self, path: &str) -> String {
        path::normalize(path, &self.cwd, &self.home)
    }

    /// Find the node at `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<&Node> {
        self.resolve_abs(&self.normalize(path))
    }

    fn resolve_abs(&self, abs: &str) -> Option<&Node> {
        let mut cur = &self.root;
        for seg in segments(abs) {
            match cur {
                Node::Directory(d) => cur = d.children.get(seg)?,
                Node::File(_) => return None,
            }
        }
        Some(cur)
    }

    fn is_dir(&self, abs: &str) -> bool {
        matches!(self.resolve_abs(abs), Some(Node::Directory(_)))
    }

    /// Absolute path of `node`, located by a search from the root.
    pub fn path_of(&self, node: &Node) -> Option<String> {
        fn find(dir: &Node, target: &Node, at: &str) -> Option<String> {
            if std::ptr::eq(dir, target) {
                return Some(at.to_string());
            }
            if let Node::Directory(d) = dir {
                for (name, c) in &d.children {
                    if let Some(found) = find(c, target, &child(at, name)) {
                        return Some(found);
                    }
                }
            }
            None
        }
        find(&self.root, node, "/")
    }

    /// The directory at `dir_abs`, without creating anything.
    fn dir_mut(&mut self, dir_abs: &str, target: &str, operation: &str) -> Result<&mut Directory, VfsError> {
        let mut cur = match &mut self.root {
            Node::Directory(d) => d,
            Node::File(_) => return Err(VfsError::not_a_directory(target, operation)),
        };
        for seg in segments(dir_abs) {
            cur = match cur.children.get_mut(seg) {
                Some(Node::Directory(d)) => d,
                Some(Node::File(_)) => return Err(VfsError::not_a_directory(target, operation)),
                None => return Err(VfsError::not_found(target, operation)),
            };
        }
        Ok(cur)
    }

    /// Fails if any existing segment of `dir_abs` is a file.
    fn check_creatable(&self, dir_abs: &str, target: &str, operation: &str) -> Result<(), VfsError> {
        let mut cur = &self.root;
        for seg in segments(dir_abs) {
            match cur {
                Node::Directory(d) => match d.children.get(seg) {
                    Some(next) => cur = next,
                    None => return Ok(()),
                },
                Node::File(_) => return Err(VfsError::not_a_directory(target, operation)),
            }
        }
        match cur {
            Node::Directory(_) => Ok(()),
            Node::File(_) => Err(VfsError::not_a_directory(target, operation)),
        }
    }

    /// Create every missing directory along `dir_abs`. Callers run
    /// [`check_creatable`](Self::check_creatable) first.
    fn ensure_dirs(&mut self, dir_abs: &str, target: &str, operation: &str) -> Result<&mut Directory, VfsError> {
        let mut cur = match &mut self.root {
            Node::Directory(d) => d,
            Node::File(_) => return Err(VfsError::not_a_directory(target, operation)),
        };
        for seg in segments(dir_abs) {
            let next = cur
                .children
                .entry(seg.to_string())
                .or_insert_with(|| Node::Directory(Directory::new(seg)));
            cur = match next {
                Node::Directory(d) => d,
                Node::File(_) => return Err(VfsError::not_a_directory(target, operation)),
            };
        }
        Ok(cur)
    }

    /// Walk the cwd up until it names an existing directory.
    fn repair_cwd(&mut self) {
        while !self.is_dir(&self.cwd) {
            let parent = dirname(&self.cwd);
            debug!(from = %self.cwd, to = %parent, "cwd no longer exists");
            self.cwd = parent;
        }
    }

    // ========================================================================
    // Directory operations
    // ========================================================================

    /// Create a single directory. The parent must already exist.
    pub fn mkdir(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        if self.resolve_abs(&abs).is_some() {
            return Err(VfsError::already_exists(&abs, "mkdir"));
        }
        let name = basename(&abs).to_string();
        let dir = self.dir_mut(&dirname(&abs), &abs, "mkdir")?;
        dir.children.insert(name.clone(), Node::Directory(Directory::new(&name)));
        self.bump();
        Ok(())
    }

    /// Create a directory and any missing ancestors. Succeeds if it exists.
    pub fn mkdir_recursive(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::Directory(_)) => return Ok(()),
            Some(Node::File(_)) => return Err(VfsError::already_exists(&abs, "mkdir")),
            None => {}
        }
        self.check_creatable(&abs, &abs, "mkdir")?;
        self.ensure_dirs(&abs, &abs, "mkdir")?;
        self.bump();
        Ok(())
    }

    /// Remove an empty directory.
    pub fn rmdir(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        if abs == "/" {
            return Err(VfsError::invalid(&abs, "rmdir"));
        }
        match self.resolve_abs(&abs) {
            None => return Err(VfsError::not_found(&abs, "rmdir")),
            Some(Node::File(_)) => return Err(VfsError::not_a_directory(&abs, "rmdir")),
            Some(Node::Directory(d)) if !d.children.is_empty() => {
                return Err(VfsError::not_empty(&abs, "rmdir"))
            }
            Some(Node::Directory(_)) => {}
        }
        let name = basename(&abs).to_string();
        self.dir_mut(&dirname(&abs), &abs, "rmdir")?.children.remove(&name);
        self.repair_cwd();
        self.bump();
        Ok(())
    }

    /// Sorted child names; directories end in `/`, executables in `*`.
    pub fn ls(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let dir = self.read_dir(path)?;
        Ok(dir
            .children
            .iter()
            .map(|(name, node)| match node {
                Node::Directory(_) => format!("{}/", name),
                Node::File(f) if f.file_type == FileType::Executable => format!("{}*", name),
                Node::File(_) => name.clone(),
            })
            .collect())
    }

    /// The directory at `path`.
    pub fn read_dir(&self, path: &str) -> Result<&Directory, VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::Directory(d)) => Ok(d),
            Some(Node::File(_)) => Err(VfsError::not_a_directory(&abs, "scandir")),
            None => Err(VfsError::not_found(&abs, "scandir")),
        }
    }

    /// Move the current directory.
    pub fn chdir(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::Directory(_)) => {
                self.cwd = abs;
                self.bump();
                Ok(())
            }
            Some(Node::File(_)) => Err(VfsError::not_a_directory(&abs, "chdir")),
            None => Err(VfsError::not_found(&abs, "chdir")),
        }
    }

    // ========================================================================
    // File operations
    // ========================================================================

    /// Create or replace a file. Missing parent directories are created.
    pub fn write_file(
        &mut self,
        path: &str,
        content: &str,
        file_type: FileType,
        overwrite: bool,
    ) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::Directory(_)) => return Err(VfsError::is_a_directory(&abs, "write")),
            Some(Node::File(_)) if !overwrite => return Err(VfsError::already_exists(&abs, "write")),
            _ => {}
        }
        let parent = dirname(&abs);
        self.check_creatable(&parent, &abs, "write")?;
        let name = basename(&abs).to_string();
        let dir = self.ensure_dirs(&parent, &abs, "write")?;
        match dir.children.get_mut(&name) {
            Some(Node::File(f)) => {
                if f.file_type != file_type {
                    f.mode = file_type.default_mode();
                }
                f.content = content.to_string();
                f.file_type = file_type;
                f.modified_at = Utc::now();
            }
            _ => {
                dir.children.insert(name.clone(), Node::File(File::new(&name, content, file_type)));
            }
        }
        self.bump();
        Ok(())
    }

    /// Content of the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<&str, VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::File(f)) => Ok(&f.content),
            Some(Node::Directory(_)) => Err(VfsError::is_a_directory(&abs, "read")),
            None => Err(VfsError::not_found(&abs, "open")),
        }
    }

    /// Remove a file.
    pub fn unlink(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::File(_)) => {}
            Some(Node::Directory(_)) => return Err(VfsError::is_a_directory(&abs, "unlink")),
            None => return Err(VfsError::not_found(&abs, "unlink")),
        }
        let name = basename(&abs).to_string();
        self.dir_mut(&dirname(&abs), &abs, "unlink")?.children.remove(&name);
        self.bump();
        Ok(())
    }

    /// Create an empty file, or refresh the modification time of an existing one.
    pub fn touch(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::Directory(_)) => Ok(()),
            Some(Node::File(_)) => {
                let name = basename(&abs).to_string();
                let dir = self.dir_mut(&dirname(&abs), &abs, "touch")?;
                if let Some(Node::File(f)) = dir.children.get_mut(&name) {
                    f.modified_at = Utc::now();
                }
                self.bump();
                Ok(())
            }
            None => self.write_file(&abs, "", FileType::Text, false),
        }
    }

    /// Remove a file or an entire subtree.
    pub fn remove_all(&mut self, path: &str) -> Result<(), VfsError> {
        let abs = self.normalize(path);
        if abs == "/" {
            return Err(VfsError::invalid(&abs, "rm"));
        }
        if self.resolve_abs(&abs).is_none() {
            return Err(VfsError::not_found(&abs, "rm"));
        }
        let name = basename(&abs).to_string();
        self.dir_mut(&dirname(&abs), &abs, "rm")?.children.remove(&name);
        self.repair_cwd();
        self.bump();
        Ok(())
    }

    /// Where `src` lands when copied or moved onto `dst_abs`.
    fn landing_path(&self, src_abs: &str, dst_abs: &str) -> String {
        match self.resolve_abs(dst_abs) {
            Some(Node::Directory(_)) => child(dst_abs, basename(src_abs)),
            _ => dst_abs.to_string(),
        }
    }

    /// Check that `node` may be placed at `target`.
    fn check_landing(&self, node: &Node, target: &str, operation: &str) -> Result<(), VfsError> {
        match (node, self.resolve_abs(target)) {
            (Node::Directory(_), Some(Node::Directory(_))) => Err(VfsError::already_exists(target, operation)),
            (Node::File(_), Some(Node::Directory(_))) => Err(VfsError::is_a_directory(target, operation)),
            (Node::Directory(_), Some(Node::File(_))) => Err(VfsError::not_a_directory(target, operation)),
            _ => match self.resolve_abs(&dirname(target)) {
                Some(Node::Directory(_)) => Ok(()),
                Some(Node::File(_)) => Err(VfsError::not_a_directory(target, operation)),
                None => Err(VfsError::not_found(target, operation)),
            },
        }
    }

    /// Copy a file, or a directory tree when `recursive` is set.
    pub fn copy(&mut self, src: &str, dst: &str, recursive: bool) -> Result<(), VfsError> {
        let src_abs = self.normalize(src);
        let dst_abs = self.normalize(dst);
        let mut node = self
            .resolve_abs(&src_abs)
            .cloned()
            .ok_or_else(|| VfsError::not_found(&src_abs, "cp"))?;
        if node.is_directory() && !recursive {
            return Err(VfsError::is_a_directory(&src_abs, "cp"));
        }
        let target = self.landing_path(&src_abs, &dst_abs);
        if node.is_directory() && is_within(&target, &src_abs) {
            return Err(VfsError::invalid(&target, "cp"));
        }
        if target == src_abs {
            return Err(VfsError::invalid(&target, "cp"));
        }
        self.check_landing(&node, &target, "cp")?;

        let name = basename(&target).to_string();
        node.set_name(&name);
        if let Node::File(f) = &mut node {
            let now = Utc::now();
            f.created_at = now;
            f.modified_at = now;
        }
        self.dir_mut(&dirname(&target), &target, "cp")?.children.insert(name, node);
        self.bump();
        Ok(())
    }

    /// Move or rename a node. The cwd follows a moved ancestor.
    pub fn rename(&mut self, src: &str, dst: &str) -> Result<(), VfsError> {
        let src_abs = self.normalize(src);
        let dst_abs = self.normalize(dst);
        if src_abs == "/" {
            return Err(VfsError::invalid(&src_abs, "mv"));
        }
        let node = self
            .resolve_abs(&src_abs)
            .ok_or_else(|| VfsError::not_found(&src_abs, "mv"))?;
        let target = self.landing_path(&src_abs, &dst_abs);
        if target == src_abs {
            return Ok(());
        }
        if node.is_directory() && is_within(&target, &src_abs) {
            return Err(VfsError::invalid(&target, "mv"));
        }
        self.check_landing(node, &target, "mv")?;

        let src_name = basename(&src_abs).to_string();
        let mut node = match self.dir_mut(&dirname(&src_abs), &src_abs, "mv")?.children.remove(&src_name) {
            Some(n) => n,
            None => return Err(VfsError::not_found(&src_abs, "mv")),
        };
        let name = basename(&target).to_string();
        node.set_name(&name);
        match self.dir_mut(&dirname(&target), &target, "mv") {
            Ok(dir) => {
                dir.children.insert(name, node);
            }
            Err(e) => {
                node.set_name(&src_name);
                if let Ok(dir) = self.dir_mut(&dirname(&src_abs), &src_abs, "mv") {
                    dir.children.insert(src_name, node);
                }
                return Err(e);
            }
        }

        if is_within(&self.cwd, &src_abs) {
            self.cwd = format!("{}{}", target, &self.cwd[src_abs.len()..]);
        }
        self.repair_cwd();
        self.bump();
        Ok(())
    }

    /// Status of the node at `path`.
    pub fn stat(&self, path: &str) -> Result<FileStat, VfsError> {
        let abs = self.normalize(path);
        match self.resolve_abs(&abs) {
            Some(Node::File(f)) => Ok(FileStat {
                kind: NodeKind::File,
                size: f.content.len() as u64,
                file_type: Some(f.file_type),
                mode: f.mode,
                created_at: Some(f.created_at),
                modified_at: Some(f.modified_at),
            }),
            Some(Node::Directory(d)) => Ok(FileStat {
                kind: NodeKind::Directory,
                size: d.children.len() as u64,
                file_type: None,
                mode: 0o755,
                created_at: None,
                modified_at: None,
            }),
            None => Err(VfsError::not_found(&abs, "stat")),
        }
    }

    /// Every node at or below `path`, depth-first, children in sorted order.
    pub fn walk(&self, path: &str) -> Result<Vec<(String, &Node)>, VfsError> {
        fn visit<'a>(node: &'a Node, at: String, out: &mut Vec<(String, &'a Node)>) {
            if let Node::Directory(d) = node {
                out.push((at.clone(), node));
                for (name, c) in &d.children {
                    visit(c, child(&at, name), out);
                }
            } else {
                out.push((at, node));
            }
        }
        let abs = self.normalize(path);
        let start = self
            .resolve_abs(&abs)
            .ok_or_else(|| VfsError::not_found(&abs, "walk"))?;
        let mut out = Vec::new();
        visit(start, abs, &mut out);
        Ok(out)
    }

    /// Paths at or below `path` whose name matches `name` (a glob) and whose
    /// kind matches `kind`. Either filter may be omitted.
    pub fn find(
        &self,
        path: &str,
        name: Option<&glob::Pattern>,
        kind: Option<NodeKind>,
    ) -> Result<Vec<String>, VfsError> {
        let found = self
            .walk(path)?
            .into_iter()
            .filter(|(p, node)| {
                let kind_ok = match kind {
                    Some(NodeKind::File) => node.is_file(),
                    Some(NodeKind::Directory) => node.is_directory(),
                    None => true,
                };
                let name_ok = name.map_or(true, |pat| pat.matches(basename(p)));
                kind_ok && name_ok
            })
            .map(|(p, _)| p)
            .collect();
        Ok(found)
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
