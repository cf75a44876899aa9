use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct UptimeCommand;

fn format_uptime(d: Duration) -> String {
    let secs = d.as_secs();
    let (days, hours, mins) = (secs / 86_400, (secs % 86_400) / 3600, (secs % 3600) / 60);
    match (days, hours) {
        (0, 0) => format!("{} min", mins),
        (0, _) => format!("{}:{:02}", hours, mins),
        (1, _) => format!("1 day, {}:{:02}", hours, mins),
        _ => format!("{} days, {}:{:02}", days, hours, mins),
    }
}

#[async_trait]
impl Command for UptimeCommand {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn description(&self) -> &'static str {
        "Show how long the session has been running"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        CommandResult::success(format!(
            " {} up {},  1 user\n",
            Local::now().format("%H:%M:%S"),
            format_uptime(ctx.session.uptime())
        ))
    }
}
