// src/commands/echo/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn description(&self) -> &'static str {
        "Print text"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut args = ctx.args.as_slice();
        let mut newline = true;
        if args.first().map(String::as_str) == Some("-n") {
            newline = false;
            args = &args[1..];
        }
        let mut stdout = args.join(" ");
        if newline {
            stdout.push('\n');
        }
        CommandResult::success(stdout)
    }
}
