// src/commands/types.rs
use std::sync::Arc;

use async_trait::async_trait;

use super::registry::CommandRegistry;
use crate::fs::VfsError;
use crate::session::Session;

/// Result of running a command. `stdout` is written to the sink as text
/// lines, `stderr` as error lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self { stdout, stderr: String::new(), exit_code: 0 }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn error(stderr: String) -> Self {
        Self { stdout: String::new(), stderr, exit_code: 1 }
    }

    pub fn with_exit_code(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }

    /// `{cmd}: {operand}: {reason}`, the single line a failed VFS call turns into.
    pub fn vfs_error(cmd: &str, operand: &str, err: &VfsError) -> Self {
        Self::error(format!("{}: {}: {}\n", cmd, operand, err.reason()))
    }
}

/// What a command runs against.
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub session: &'a mut Session,
    pub commands: &'a CommandRegistry,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Extra names resolving to this command. They are not listed separately.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}

/// Handler signature of a [`FnCommand`].
pub type CommandFn = Arc<dyn Fn(&[String], &mut Session) -> CommandResult + Send + Sync>;

/// A command built from a plain closure, for embedders adding their own.
pub struct FnCommand {
    name: &'static str,
    description: &'static str,
    handler: CommandFn,
}

impl FnCommand {
    pub fn new<F>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        F: Fn(&[String], &mut Session) -> CommandResult + Send + Sync + 'static,
    {
        Self { name, description, handler: Arc::new(handler) }
    }
}

#[async_trait]
impl Command for FnCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        (self.handler)(&ctx.args, ctx.session)
    }
}
