use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HostnameCommand;

#[async_trait]
impl Command for HostnameCommand {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn description(&self) -> &'static str {
        "Print the host name"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!("{}\n", ctx.session.config.hostname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_hostname() {
        let mut h = Harness::new();
        let result = h.run(&HostnameCommand, &[]).await;
        assert_eq!(result.stdout, "central-terminal\n");
    }
}
