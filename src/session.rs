//! Session state
//!
//! Everything a line of input can touch: the file system, the output sink,
//! history, the addon runtime and configuration. One instance per terminal,
//! handed by reference to every command.

use std::time::{Duration, Instant};

use crate::addons::{AddonError, AddonRuntime};
use crate::config::ShellConfig;
use crate::fs::{path, Vfs};
use crate::history::History;
use crate::output::Output;
use crate::task::InterruptHandle;

pub struct Session {
    pub vfs: Vfs,
    pub out: Output,
    pub history: History,
    pub addons: AddonRuntime,
    pub config: ShellConfig,
    /// Slot of the cancellable loop wired to the interrupt signal.
    pub interrupts: InterruptHandle,
    started_at: Instant,
}

impl Session {
    pub fn new(vfs: Vfs, out: Output, config: ShellConfig) -> Self {
        Self {
            vfs,
            out,
            history: History::new(),
            addons: AddonRuntime::with_builtins(),
            config,
            interrupts: InterruptHandle::new(),
            started_at: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Prompt for the next line: `<addon>>` while an addon owns the input,
    /// `user@host:cwd$` otherwise.
    pub fn prompt(&self) -> String {
        match self.addons.active() {
            Some(name) => format!("{}>", name),
            None => format!(
                "{}@{}:{}$",
                self.config.user,
                self.config.hostname,
                path::tildify(self.vfs.cwd(), self.vfs.home())
            ),
        }
    }

    pub fn start_addon(&mut self, name: &str, args: &[String]) -> Result<(), AddonError> {
        self.addons.start(name, args, &mut self.vfs, &mut self.out)
    }

    pub fn addon_input(&mut self, line: &str) -> Result<(), AddonError> {
        self.addons.handle_input(line, &mut self.vfs, &mut self.out)
    }

    pub fn stop_addon(&mut self) -> Result<(), AddonError> {
        self.addons.stop(&mut self.vfs, &mut self.out)
    }
}
