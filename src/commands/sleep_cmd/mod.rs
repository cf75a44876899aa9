// src/commands/sleep_cmd/mod.rs
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex_lite::Regex;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::task::sleep_cancellable;

pub struct SleepCommand;

const HELP: &str = "Usage: sleep NUMBER[SUFFIX]\n\ndelay for a specified amount of time\n\nSUFFIX may be:\n  s - seconds (default)\n  m - minutes\n  h - hours\n\nNUMBER may be a decimal number. Ctrl+C interrupts.\n";

lazy_static! {
    static ref DURATION: Regex = Regex::new(r"^(\d+\.?\d*)(s|m|h)?$").unwrap();
}

fn parse_duration(arg: &str) -> Option<f64> {
    let caps = DURATION.captures(arg)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or("s");
    match suffix {
        "s" => Some(value * 1000.0),
        "m" => Some(value * 60.0 * 1000.0),
        "h" => Some(value * 3600.0 * 1000.0),
        _ => None,
    }
}

#[async_trait]
impl Command for SleepCommand {
    fn name(&self) -> &'static str {
        "sleep"
    }

    fn description(&self) -> &'static str {
        "Pause for a number of seconds"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;
        if args.iter().any(|a| a == "--help") {
            return CommandResult::success(HELP.into());
        }
        if args.is_empty() {
            return CommandResult::error("sleep: missing operand\n".into());
        }
        let mut total_ms: f64 = 0.0;
        for arg in args {
            match parse_duration(arg) {
                Some(ms) => total_ms += ms,
                None => return CommandResult::error(format!("sleep: invalid time interval '{}'\n", arg)),
            }
        }

        let interrupts = ctx.session.interrupts.clone();
        let handle = interrupts.wire();
        let finished = sleep_cancellable(&handle, Duration::from_millis(total_ms as u64)).await;
        interrupts.release(&handle);
        if finished {
            CommandResult::empty()
        } else {
            CommandResult::with_exit_code(String::new(), String::new(), 130)
        }
    }
}
