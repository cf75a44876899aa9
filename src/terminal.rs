//! Terminal
//!
//! The shell engine. Owns the command registry, the session and the optional
//! snapshot store, and processes input one line at a time:
//!
//! 1. blank lines are ignored
//! 2. `!N` is appended to history as typed, then replaced by entry N, or
//!    reports an error and stops
//! 3. the line is echoed after the prompt and appended to history
//! 4. an active addon receives the line verbatim; otherwise it is tokenized
//!    and dispatched to a command
//! 5. the file system is persisted if the line changed it

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::addons::Addon;
use crate::boot::{default_checks, run_boot_checks, BootCheck, BootReport};
use crate::commands::{create_default_registry, tokenize, Command, CommandContext, CommandRegistry, CommandResult};
use crate::config::ShellConfig;
use crate::fs::{Node, Vfs};
use crate::history::recall_index;
use crate::output::{Output, OutputSink};
use crate::persist::{load_vfs, save_vfs, FileStore, SnapshotStore};
use crate::session::Session;
use crate::task::InterruptHandle;

/// Outcome of tab completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    /// The whole input line with its last word completed.
    Unique(String),
    /// Several matches for the last word, sorted.
    Candidates(Vec<String>),
}

pub struct Terminal {
    commands: CommandRegistry,
    session: Session,
    store: Option<Box<dyn SnapshotStore>>,
    boot_checks: Vec<BootCheck>,
}

impl Terminal {
    /// A terminal with a freshly seeded file system and no persistence.
    pub fn new(config: ShellConfig, sink: Box<dyn OutputSink>) -> Self {
        let vfs = Vfs::with_home(&config.home);
        Self::from_parts(config, sink, vfs, None)
    }

    /// A terminal restoring its file system from `store` and saving back to it.
    pub fn with_store(config: ShellConfig, sink: Box<dyn OutputSink>, store: Box<dyn SnapshotStore>) -> Self {
        let vfs = load_vfs(store.as_ref(), &config.home);
        Self::from_parts(config, sink, vfs, Some(store))
    }

    /// Persist to `config.state_file` when it is set.
    pub fn open(config: ShellConfig, sink: Box<dyn OutputSink>) -> Self {
        match config.state_file.clone() {
            Some(file) => Self::with_store(config, sink, Box::new(FileStore::new(file))),
            None => Self::new(config, sink),
        }
    }

    fn from_parts(
        config: ShellConfig,
        sink: Box<dyn OutputSink>,
        vfs: Vfs,
        store: Option<Box<dyn SnapshotStore>>,
    ) -> Self {
        Self {
            commands: create_default_registry(),
            session: Session::new(vfs, Output::new(sink), config),
            store,
            boot_checks: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn register_command(&mut self, cmd: Arc<dyn Command>) {
        self.commands.register(cmd);
    }

    pub fn register_addon(&mut self, addon: Box<dyn Addon>) {
        self.session.addons.register(addon);
    }

    /// Queue a check to run after the built-in ones in [`Terminal::boot`].
    pub fn add_boot_check(&mut self, check: BootCheck) {
        self.boot_checks.push(check);
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Handle for interrupting a line while it executes.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.session.interrupts.clone()
    }

    pub fn history_previous(&mut self) -> Option<String> {
        self.session.history.previous().map(str::to_string)
    }

    pub fn history_next(&mut self) -> Option<String> {
        self.session.history.next().map(str::to_string)
    }

    pub async fn boot(&mut self) -> BootReport {
        let mut checks = default_checks(&self.session);
        checks.extend(self.boot_checks.iter().cloned());
        run_boot_checks(&checks, &mut self.session).await
    }

    /// Process one line of input. Returns once the line is fully handled.
    pub async fn submit(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let generation = self.session.vfs.generation();

        let line = match recall_index(line) {
            Some(index) => {
                let resolved = self.session.history.resolve(index).map(str::to_string);
                self.session.history.push(line);
                match resolved {
                    Ok(entry) => entry,
                    Err(e) => {
                        self.session.out.error(e.to_string());
                        return;
                    }
                }
            }
            None => line.to_string(),
        };

        let echo = format!("{} {}", self.session.prompt(), line);
        self.session.out.echo(echo);
        self.session.history.push(&line);

        if self.session.addons.is_active() {
            if let Err(e) = self.session.addon_input(&line) {
                warn!(error = %e, "addon input dropped");
            }
        } else {
            self.dispatch(&line).await;
        }

        self.persist_if_changed(generation);
    }

    async fn dispatch(&mut self, line: &str) {
        let tokens = tokenize(line);
        let Some((name, args)) = tokens.split_first() else {
            return;
        };
        let Some(cmd) = self.commands.get(name) else {
            debug!(command = %name, "command not found");
            self.session.out.error(format!("{}: command not found", name));
            return;
        };

        debug!(command = %cmd.name(), args = args.len(), "dispatch");
        let ctx = CommandContext {
            args: args.to_vec(),
            session: &mut self.session,
            commands: &self.commands,
        };
        let result = cmd.execute(ctx).await;
        self.emit_result(&result);
    }

    fn emit_result(&mut self, result: &CommandResult) {
        if !result.stdout.is_empty() {
            self.session.out.text(&result.stdout);
        }
        if !result.stderr.is_empty() {
            self.session.out.error(&result.stderr);
        }
    }

    fn persist_if_changed(&mut self, before: u64) {
        if self.session.vfs.generation() == before {
            return;
        }
        if let Some(store) = self.store.as_deref_mut() {
            save_vfs(store, &self.session.vfs);
        }
    }

    /// Ctrl+C: stop the active addon, else cancel the wired task, else
    /// print `^C`.
    pub fn interrupt(&mut self) {
        if self.session.addons.is_active() {
            info!("interrupt stopped active addon");
            if let Err(e) = self.session.stop_addon() {
                warn!(error = %e, "failed to stop addon");
            }
        } else if !self.session.interrupts.fire() {
            self.session.out.text("^C");
        }
    }

    /// Complete the last word of `partial`: command names for the first
    /// word, paths after that.
    pub fn complete(&self, partial: &str) -> Completion {
        if self.session.addons.is_active() {
            return Completion::None;
        }
        let (head, word) = match partial.rfind(' ') {
            Some(i) => (&partial[..=i], &partial[i + 1..]),
            None => ("", partial),
        };

        let mut matches: Vec<String> = if head.trim().is_empty() {
            let word = word.to_lowercase();
            self
                .commands
                .names()
                .into_iter()
                .filter(|n| n.starts_with(&word))
                .map(|n| format!("{} ", n))
                .collect()
        } else {
            self.complete_path(word)
        };

        match matches.len() {
            0 => Completion::None,
            1 => Completion::Unique(format!("{}{}", head, matches.remove(0))),
            _ => Completion::Candidates(matches.into_iter().map(|m| m.trim_end().to_string()).collect()),
        }
    }

    fn complete_path(&self, word: &str) -> Vec<String> {
        let (dir, prefix) = match word.rfind('/') {
            Some(i) => (&word[..=i], &word[i + 1..]),
            None => ("", word),
        };
        let lookup = if dir.is_empty() { "." } else { dir };
        let Ok(listing) = self.session.vfs.read_dir(lookup) else {
            return Vec::new();
        };
        listing
            .children
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, node)| match node {
                Node::Directory(_) => format!("{}{}/", dir, name),
                Node::File(_) => format!("{}{}", dir, name),
            })
            .collect()
    }
}
