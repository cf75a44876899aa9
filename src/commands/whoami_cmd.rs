use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn description(&self) -> &'static str {
        "Print the current user name"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!("{}\n", ctx.session.config.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_whoami() {
        let mut h = Harness::new();
        h.session.config.user = "ada".to_string();
        let result = h.run(&WhoamiCommand, &[]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "ada\n");
    }
}
