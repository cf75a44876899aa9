use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct RmdirCommand;

const USAGE: &str = "Usage: rmdir DIRECTORY...
Remove empty directories.";

#[async_trait]
impl Command for RmdirCommand {
    fn name(&self) -> &'static str {
        "rmdir"
    }

    fn description(&self) -> &'static str {
        "Remove empty directories"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(format!("{}\n", USAGE));
        }
        if ctx.args.is_empty() {
            return CommandResult::error("rmdir: missing operand\n".to_string());
        }

        let vfs = &mut ctx.session.vfs;
        let mut stderr = String::new();
        for dir in &ctx.args {
            if let Err(e) = vfs.rmdir(dir) {
                stderr.push_str(&format!("rmdir: failed to remove '{}': {}\n", dir, e.reason()));
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
