// src/commands/registry.rs
use std::collections::HashMap;
use std::sync::Arc;

use super::types::Command;

/// Name table of commands. Names and aliases are matched case-insensitively;
/// an alias points at the same entry as the name it belongs to.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Arc<dyn Command>) {
        for alias in cmd.aliases() {
            self.commands.insert(alias.to_lowercase(), Arc::clone(&cmd));
        }
        self.commands.insert(cmd.name().to_lowercase(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    /// Every name and alias, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// One entry per command, aliases folded in, sorted by name.
    pub fn list(&self) -> Vec<Arc<dyn Command>> {
        let mut out: Vec<Arc<dyn Command>> = Vec::new();
        for cmd in self.commands.values() {
            if !out.iter().any(|c| Arc::ptr_eq(c, cmd)) {
                out.push(Arc::clone(cmd));
            }
        }
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
