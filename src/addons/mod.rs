//! Addon runtime
//!
//! An addon is a pluggable handler that, once started, owns the whole input
//! stream until it stops. The runtime holds the registered addons and the
//! Idle / Active state; at most one addon is active at a time.

pub mod editor;
pub mod rps;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::fs::Vfs;
use crate::output::Output;

pub use editor::EditorAddon;
pub use rps::RpsAddon;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddonError {
    #[error("{0}: addon not found")]
    NotFound(String),
    #[error("an addon is already running: {0}")]
    AlreadyActive(String),
    #[error("No active addon to exit.")]
    NotActive,
}

/// What an addon hook gets to work with.
pub struct AddonContext<'a> {
    pub vfs: &'a mut Vfs,
    pub out: &'a mut Output,
    exit_requested: bool,
}

impl<'a> AddonContext<'a> {
    pub fn new(vfs: &'a mut Vfs, out: &'a mut Output) -> Self {
        Self { vfs, out, exit_requested: false }
    }

    /// Ask the runtime to stop this addon once the current hook returns.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Lifecycle hooks of an addon. Private state lives in the implementing type
/// and survives between activations.
pub trait Addon: Send {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    fn start(&mut self, ctx: &mut AddonContext<'_>, args: &[String]);

    /// Called with every raw input line while the addon is active.
    fn handle_input(&mut self, ctx: &mut AddonContext<'_>, line: &str);

    fn stop(&mut self, _ctx: &mut AddonContext<'_>) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Active(String),
}

pub struct AddonRuntime {
    addons: BTreeMap<String, Box<dyn Addon>>,
    state: State,
}

impl AddonRuntime {
    pub fn new() -> Self {
        Self { addons: BTreeMap::new(), state: State::Idle }
    }

    /// Runtime with the built-in addons registered.
    pub fn with_builtins() -> Self {
        let mut runtime = Self::new();
        runtime.register(Box::new(EditorAddon::new()));
        runtime.register(Box::new(RpsAddon::new()));
        runtime
    }

    /// Register an addon under its lowercased name, replacing any namesake.
    pub fn register(&mut self, addon: Box<dyn Addon>) {
        self.addons.insert(addon.name().to_lowercase(), addon);
    }

    /// `(name, description)` of every registered addon, sorted by name.
    pub fn list(&self) -> Vec<(&str, &'static str)> {
        self.addons.iter().map(|(k, a)| (k.as_str(), a.description())).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.addons.contains_key(&name.to_lowercase())
    }

    /// Name of the active addon.
    pub fn active(&self) -> Option<&str> {
        match &self.state {
            State::Active(name) => Some(name),
            State::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Activate `name`. Only legal while idle.
    pub fn start(
        &mut self,
        name: &str,
        args: &[String],
        vfs: &mut Vfs,
        out: &mut Output,
    ) -> Result<(), AddonError> {
        if let State::Active(current) = &self.state {
            return Err(AddonError::AlreadyActive(current.clone()));
        }
        let key = name.to_lowercase();
        let addon = self.addons.get_mut(&key).ok_or_else(|| AddonError::NotFound(name.to_string()))?;

        info!(addon = %key, "addon started");
        self.state = State::Active(key);
        let mut ctx = AddonContext::new(vfs, out);
        addon.start(&mut ctx, args);
        if ctx.exit_requested() {
            self.stop(vfs, out)?;
        }
        Ok(())
    }

    /// Route one input line to the active addon.
    pub fn handle_input(&mut self, line: &str, vfs: &mut Vfs, out: &mut Output) -> Result<(), AddonError> {
        let State::Active(key) = &self.state else {
            return Err(AddonError::NotActive);
        };
        let addon = self.addons.get_mut(key).ok_or_else(|| AddonError::NotFound(key.clone()))?;
        let mut ctx = AddonContext::new(vfs, out);
        addon.handle_input(&mut ctx, line);
        if ctx.exit_requested() {
            self.stop(vfs, out)?;
        }
        Ok(())
    }

    /// Deactivate the running addon. Only legal while active.
    pub fn stop(&mut self, vfs: &mut Vfs, out: &mut Output) -> Result<(), AddonError> {
        let State::Active(key) = std::mem::replace(&mut self.state, State::Idle) else {
            return Err(AddonError::NotActive);
        };
        if let Some(addon) = self.addons.get_mut(&key) {
            let mut ctx = AddonContext::new(vfs, out);
            addon.stop(&mut ctx);
        }
        debug!(addon = %key, "addon stopped");
        out.text("Returned to main terminal.");
        Ok(())
    }
}

impl Default for AddonRuntime {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
