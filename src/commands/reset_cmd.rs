use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &'static str {
        "reset"
    }

    fn description(&self) -> &'static str {
        "Restore the default filesystem"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        ctx.session.vfs.reset();
        CommandResult::success("Filesystem reset to defaults.\n".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_reset() {
        let mut h = Harness::new();
        h.session.vfs.remove_all("/docs").unwrap();
        h.session.vfs.chdir("/tmp").unwrap();
        let r = h.run(&ResetCommand, &[]).await;
        assert_eq!(r.stdout, "Filesystem reset to defaults.\n");
        assert!(h.session.vfs.resolve("/docs/guide.txt").is_some());
        assert_eq!(h.session.vfs.cwd(), "/home/user");
    }
}
