// src/commands/pwd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn description(&self) -> &'static str {
        "Print current working directory"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!("{}\n", ctx.session.vfs.cwd()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_pwd_default() {
        let mut h = Harness::new();
        let result = h.run(&PwdCommand, &[]).await;
        assert_eq!(result.stdout, "/home/user\n");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_pwd_root() {
        let mut h = Harness::new();
        h.session.vfs.chdir("/").unwrap();
        let result = h.run(&PwdCommand, &["ignored"]).await;
        assert_eq!(result.stdout, "/\n");
    }
}
