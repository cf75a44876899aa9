use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HistoryCommand;

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn description(&self) -> &'static str {
        "Show command history. Use !<number> to rerun."
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "history - display command history\n\nUsage: history [n]\n\nOptions:\n  -c      clear the history list\n".to_string()
            );
        }

        let history = &mut ctx.session.history;

        if ctx.args.first().map(|s| s.as_str()) == Some("-c") {
            history.clear();
            return CommandResult::empty();
        }

        let entries = history.entries();
        let count = match ctx.args.first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) => n.min(entries.len()),
                Err(_) => return CommandResult::error(format!("history: {}: numeric argument required\n", arg)),
            },
            None => entries.len(),
        };

        let start = entries.len().saturating_sub(count);
        let mut stdout = String::new();
        for (i, cmd) in entries.iter().enumerate().skip(start) {
            stdout.push_str(&format!("{:5}  {}\n", i + 1, cmd));
        }

        CommandResult::success(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    fn seeded() -> Harness {
        let mut h = Harness::new();
        for line in ["ls", "pwd", "echo hi"] {
            h.session.history.push(line);
        }
        h
    }

    #[tokio::test]
    async fn test_history_lists_all() {
        let mut h = seeded();
        let r = h.run(&HistoryCommand, &[]).await;
        assert_eq!(r.stdout, "    1  ls\n    2  pwd\n    3  echo hi\n");
    }

    #[tokio::test]
    async fn test_history_last_n() {
        let mut h = seeded();
        let r = h.run(&HistoryCommand, &["2"]).await;
        assert_eq!(r.stdout, "    2  pwd\n    3  echo hi\n");
    }

    #[tokio::test]
    async fn test_history_clear() {
        let mut h = seeded();
        h.run(&HistoryCommand, &["-c"]).await;
        assert!(h.session.history.is_empty());
    }

    #[tokio::test]
    async fn test_history_bad_arg() {
        let mut h = seeded();
        let r = h.run(&HistoryCommand, &["x"]).await;
        assert_eq!(r.stderr, "history: x: numeric argument required\n");
    }
}
