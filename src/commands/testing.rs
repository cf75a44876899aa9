// src/commands/testing.rs
use super::{create_default_registry, Command, CommandContext, CommandRegistry, CommandResult};
use crate::config::ShellConfig;
use crate::fs::Vfs;
use crate::output::{MemorySink, Output};
use crate::session::Session;

/// A seeded session with captured output, for running single commands.
pub(crate) struct Harness {
    pub session: Session,
    pub sink: MemorySink,
    pub registry: CommandRegistry,
}

impl Harness {
    pub fn new() -> Self {
        let sink = MemorySink::new();
        let session = Session::new(Vfs::new(), Output::new(Box::new(sink.clone())), ShellConfig::default());
        Self { session, sink, registry: create_default_registry() }
    }

    pub async fn run(&mut self, cmd: &dyn Command, args: &[&str]) -> CommandResult {
        let ctx = CommandContext {
            args: args.iter().map(|s| s.to_string()).collect(),
            session: &mut self.session,
            commands: &self.registry,
        };
        cmd.execute(ctx).await
    }
}
