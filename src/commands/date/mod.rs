// src/commands/date/mod.rs
use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use crate::commands::{Command, CommandContext, CommandResult};

pub struct DateCommand;

const HELP: &str = "Usage: date [-u] [-I] [+FORMAT]\n\n\
Display the current date and time.\n\n\
Options:\n  -u         print UTC\n  -I         output in ISO 8601 format\n      --help display this help\n\n\
FORMAT controls the output. Common sequences:\n  %Y year  %m month  %d day  %H hour  %M minute  %S second\n  %F full date  %T full time  %a weekday  %b month name  %s timestamp\n";

/// Format `dt` with a strftime string, `None` if the string is malformed.
fn format_checked(dt: &DateTime<Local>, utc: bool, fmt: &str) -> Option<String> {
    let items: Vec<Item> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        return None;
    }
    Some(if utc {
        dt.with_timezone(&Utc).format_with_items(items.into_iter()).to_string()
    } else {
        dt.format_with_items(items.into_iter()).to_string()
    })
}

#[async_trait]
impl Command for DateCommand {
    fn name(&self) -> &'static str {
        "date"
    }

    fn description(&self) -> &'static str {
        "Displays the current date and time."
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["time"]
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut utc = false;
        let mut iso = false;
        let mut format_str: Option<&str> = None;

        for a in &ctx.args {
            match a.as_str() {
                "--help" => return CommandResult::success(HELP.into()),
                "-u" | "--utc" => utc = true,
                "-I" | "--iso-8601" => iso = true,
                _ if a.starts_with('+') => format_str = Some(&a[1..]),
                _ => return CommandResult::error(format!("date: invalid option '{}'\n", a)),
            }
        }

        let now = Local::now();
        let fmt = match (format_str, iso, utc) {
            (Some(f), _, _) => f,
            (None, true, true) => "%Y-%m-%dT%H:%M:%S+00:00",
            (None, true, false) => "%Y-%m-%dT%H:%M:%S%:z",
            (None, false, true) => "%a %b %e %H:%M:%S UTC %Y",
            (None, false, false) => "%a %b %e %H:%M:%S %:z %Y",
        };
        match format_checked(&now, utc, fmt) {
            Some(s) => CommandResult::success(format!("{}\n", s)),
            None => CommandResult::error(format!("date: invalid format '{}'\n", fmt)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use chrono::TimeZone;

    #[test]
    fn test_format_checked() {
        let dt = Local.with_ymd_and_hms(2024, 1, 15, 12, 30, 5).unwrap();
        assert_eq!(format_checked(&dt, false, "%F %T").unwrap(), "2024-01-15 12:30:05");
        assert!(format_checked(&dt, false, "%Q").is_none());
    }

    #[tokio::test]
    async fn test_date_year() {
        let mut h = Harness::new();
        let r = h.run(&DateCommand, &["+%Y"]).await;
        assert_eq!(r.stdout.trim().len(), 4);
        assert_eq!(r.exit_code, 0);
    }

    #[tokio::test]
    async fn test_date_iso_utc() {
        let mut h = Harness::new();
        let r = h.run(&DateCommand, &["-u", "-I"]).await;
        assert!(r.stdout.trim_end().ends_with("+00:00"));
    }

    #[tokio::test]
    async fn test_date_bad_option() {
        let mut h = Harness::new();
        let r = h.run(&DateCommand, &["-x"]).await;
        assert_eq!(r.exit_code, 1);
    }
}
