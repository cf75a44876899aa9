//! central-terminal - A simulated terminal over an in-memory file system
//!
//! The shell engine processes one line at a time against a virtual file
//! system, dispatching to built-in commands or to an active addon that owns
//! the input stream until it stops.

pub mod addons;
pub mod boot;
pub mod commands;
pub mod config;
pub mod fs;
pub mod history;
pub mod logging;
pub mod output;
pub mod persist;
pub mod session;
pub mod task;
pub mod terminal;

pub use addons::{Addon, AddonContext, AddonError, AddonRuntime};
pub use boot::{BootCheck, BootReport};
pub use commands::{Command, CommandContext, CommandRegistry, CommandResult, FnCommand};
pub use config::{ConfigError, ShellConfig};
pub use fs::{Vfs, VfsError};
pub use output::{ConsoleSink, MemorySink, OutputLine, OutputSink};
pub use persist::{FileStore, MemoryStore, SnapshotStore};
pub use session::Session;
pub use terminal::{Completion, Terminal};
