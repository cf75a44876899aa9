use std::time::Duration;

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::session::Session;
use crate::task::sleep_cancellable;

pub struct TopCommand;

const RULE: &str = "---------------------------------------------------";

fn frame(session: &mut Session) {
    let nodes = session.vfs.node_count();
    let history = session.history.len();
    let addons: Vec<String> = session.addons.list().into_iter().map(|(n, _)| n.to_string()).collect();
    let uptime = session.uptime().as_secs();

    let out = &mut session.out;
    out.clear();
    out.text("Terminal Performance Monitor (press Ctrl+C to exit)");
    out.text(RULE);
    out.text(format!("Virtual File System: {} files/dirs", nodes));
    out.text(format!("Command History: {} entries", history));
    out.text(format!("Uptime: {}s", uptime));
    out.text(format!("Registered Addons: {}", addons.len()));
    for name in &addons {
        out.text(format!("- {}", name));
    }
    out.text(RULE);
}

#[async_trait]
impl Command for TopCommand {
    fn name(&self) -> &'static str {
        "top"
    }

    fn description(&self) -> &'static str {
        "Live view of terminal statistics"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let session = ctx.session;
        let mut count: Option<u64> = None;
        let mut delay_ms = session.config.top_interval_ms;

        let mut args = ctx.args.iter();
        while let Some(arg) = args.next() {
            let value = match arg.as_str() {
                "-n" | "-d" => args.next().and_then(|v| v.parse::<u64>().ok()),
                _ => return CommandResult::error(format!("top: invalid option '{}'\n", arg)),
            };
            match (arg.as_str(), value) {
                ("-n", Some(n)) => count = Some(n),
                ("-d", Some(ms)) => delay_ms = ms,
                _ => return CommandResult::error(format!("top: option '{}' requires a number\n", arg)),
            }
        }

        let interrupts = session.interrupts.clone();
        let handle = interrupts.wire();
        let mut frames = 0u64;
        loop {
            frame(session);
            frames += 1;
            if count.is_some_and(|c| frames >= c) {
                break;
            }
            if !sleep_cancellable(&handle, Duration::from_millis(delay_ms)).await {
                session.out.text("Exiting top.");
                break;
            }
        }
        interrupts.release(&handle);
        CommandResult::empty()
    }
}
