//! Commands that hand the input stream to an addon, or take it back.

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::session::Session;

fn start(session: &mut Session, cmd: &str, addon: &str, args: &[String]) -> CommandResult {
    match session.start_addon(addon, args) {
        Ok(()) => CommandResult::empty(),
        Err(e) => CommandResult::error(format!("{}: {}\n", cmd, e)),
    }
}

pub struct RunCommand;

#[async_trait]
impl Command for RunCommand {
    fn name(&self) -> &'static str {
        "run"
    }

    fn description(&self) -> &'static str {
        "Run a registered addon"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let Some((name, rest)) = ctx.args.split_first() else {
            let mut stdout = String::from("Usage: run <addon-name> [args...]\n\nAvailable addons:\n");
            for (name, description) in ctx.session.addons.list() {
                stdout.push_str(&format!("  {:<12}{}\n", name, description));
            }
            return CommandResult::success(stdout);
        };
        start(ctx.session, "run", name, rest)
    }
}

pub struct EditCommand;

#[async_trait]
impl Command for EditCommand {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn description(&self) -> &'static str {
        "Edit a text file"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        start(ctx.session, "edit", "editor", &ctx.args)
    }
}

pub struct RpsCommand;

#[async_trait]
impl Command for RpsCommand {
    fn name(&self) -> &'static str {
        "rps"
    }

    fn description(&self) -> &'static str {
        "Play Rock, Paper, Scissors"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        start(ctx.session, "rps", "rps", &ctx.args)
    }
}

pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exits the current addon."
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        match ctx.session.stop_addon() {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::success(format!("{}\n", e)),
        }
    }
}
