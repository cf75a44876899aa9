//! Snapshot persistence
//!
//! A store holds at most one serialized snapshot. Loading never fails the
//! caller: an absent or unreadable snapshot yields a freshly seeded tree.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::fs::Vfs;

/// Storage for the serialized file system.
pub trait SnapshotStore: Send {
    /// The stored snapshot, `None` if nothing was saved yet.
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&mut self, json: &str) -> io::Result<()>;
}

/// Snapshot kept in a file on the host.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, json: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        // write-then-rename so a crash never leaves half a snapshot behind
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }
}

/// Snapshot kept in memory. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(json: &str) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(json.to_string()))) }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&mut self, json: &str) -> io::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "snapshot slot poisoned"))?;
        *slot = Some(json.to_string());
        Ok(())
    }
}

/// Restore the file system from `store`, falling back to a seeded tree.
pub fn load_vfs(store: &dyn SnapshotStore, home: &str) -> Vfs {
    match store.load() {
        Ok(Some(json)) => match Vfs::from_json(&json) {
            Ok(vfs) => {
                info!(nodes = vfs.node_count(), cwd = %vfs.cwd(), "restored filesystem snapshot");
                vfs
            }
            Err(e) => {
                warn!(error = %e, "discarding corrupt snapshot");
                Vfs::with_home(home)
            }
        },
        Ok(None) => {
            debug!("no snapshot stored, seeding filesystem");
            Vfs::with_home(home)
        }
        Err(e) => {
            warn!(error = %e, "snapshot unreadable, seeding filesystem");
            Vfs::with_home(home)
        }
    }
}

/// Serialize `vfs` into `store`. Failures are logged, never raised.
pub fn save_vfs(store: &mut dyn SnapshotStore, vfs: &Vfs) -> bool {
    let json = match vfs.to_json() {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "failed to serialize filesystem");
            return false;
        }
    };
    match store.save(&json) {
        Ok(()) => {
            debug!(bytes = json.len(), "saved filesystem snapshot");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to persist filesystem");
            false
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
