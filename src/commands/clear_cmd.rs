use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn description(&self) -> &'static str {
        "Clear terminal output"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        ctx.session.out.clear();
        CommandResult::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::output::OutputLine;

    #[tokio::test]
    async fn test_clear_emits_clear() {
        let mut h = Harness::new();
        let result = h.run(&ClearCommand, &[]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(h.sink.lines(), vec![OutputLine::Clear]);
    }
}
