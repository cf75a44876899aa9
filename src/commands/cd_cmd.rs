use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static str {
        "Change directory"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.len() > 1 {
            return CommandResult::error("cd: too many arguments\n".to_string());
        }
        let vfs = &mut ctx.session.vfs;
        let target = match ctx.args.first() {
            Some(p) => p.clone(),
            None => vfs.home().to_string(),
        };
        match vfs.chdir(&target) {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::vfs_error("cd", &target, &e),
        }
    }
}
