// src/commands/find/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::NodeKind;

pub struct FindCommand;

const HELP: &str = "Usage: find [PATH] [-name PATTERN] [-type f|d]

Search for files in a directory hierarchy.

  -name PATTERN   base name matches shell PATTERN (*, ?, [...])
  -type f|d       regular files or directories only
";

/// Render `found` the way the start operand was spelled.
fn display_path(operand: &str, start_abs: &str, found: &str) -> String {
    if found == start_abs {
        return operand.to_string();
    }
    let rest = if start_abs == "/" { found } else { &found[start_abs.len()..] };
    format!("{}{}", operand.trim_end_matches('/'), rest)
}

#[async_trait]
impl Command for FindCommand {
    fn name(&self) -> &'static str {
        "find"
    }

    fn description(&self) -> &'static str {
        "Search for files by name or type"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let args = &ctx.args;
        let mut start: Option<String> = None;
        let mut name: Option<glob::Pattern> = None;
        let mut kind: Option<NodeKind> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" => return CommandResult::success(HELP.to_string()),
                "-name" => {
                    let Some(pat) = args.get(i + 1) else {
                        return CommandResult::error("find: missing argument to '-name'\n".to_string());
                    };
                    match glob::Pattern::new(pat) {
                        Ok(p) => name = Some(p),
                        Err(e) => return CommandResult::error(format!("find: invalid pattern '{}': {}\n", pat, e)),
                    }
                    i += 1;
                }
                "-type" => {
                    kind = match args.get(i + 1).map(String::as_str) {
                        Some("f") => Some(NodeKind::File),
                        Some("d") => Some(NodeKind::Directory),
                        Some(other) => return CommandResult::error(format!("find: Unknown argument to -type: {}\n", other)),
                        None => return CommandResult::error("find: missing argument to '-type'\n".to_string()),
                    };
                    i += 1;
                }
                a if a.starts_with('-') => {
                    return CommandResult::error(format!("find: unknown predicate '{}'\n", a));
                }
                a => {
                    if start.is_some() {
                        return CommandResult::error(format!("find: paths must precede expression: '{}'\n", a));
                    }
                    start = Some(a.to_string());
                }
            }
            i += 1;
        }

        let operand = start.unwrap_or_else(|| ".".to_string());
        let vfs = &ctx.session.vfs;
        let start_abs = vfs.normalize(&operand);
        match vfs.find(&operand, name.as_ref(), kind) {
            Ok(paths) => {
                let mut stdout = String::new();
                for p in paths {
                    stdout.push_str(&display_path(&operand, &start_abs, &p));
                    stdout.push('\n');
                }
                CommandResult::success(stdout)
            }
            Err(e) => CommandResult::error(format!("find: '{}': {}\n", operand, e.reason())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::fs::FileType;

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(".", "/home/user", "/home/user"), ".");
        assert_eq!(display_path(".", "/home/user", "/home/user/a"), "./a");
        assert_eq!(display_path("/", "/", "/etc"), "/etc");
        assert_eq!(display_path("docs/", "/docs", "/docs/g"), "docs/g");
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let mut h = Harness::new();
        let result = h.run(&FindCommand, &["/", "-name", "*.txt"]).await;
        assert_eq!(result.stdout, "/docs/guide.txt\n/home/user/README.txt\n");
    }

    #[tokio::test]
    async fn test_find_relative_start() {
        let mut h = Harness::new();
        h.session.vfs.write_file("notes/a.md", "", FileType::Text, true).unwrap();
        let result = h.run(&FindCommand, &[]).await;
        assert_eq!(result.stdout, ".\n./README.txt\n./notes\n./notes/a.md\n");
    }

    #[tokio::test]
    async fn test_find_by_type() {
        let mut h = Harness::new();
        let result = h.run(&FindCommand, &["/home", "-type", "d"]).await;
        assert_eq!(result.stdout, "/home\n/home/user\n");
    }

    #[tokio::test]
    async fn test_find_errors() {
        let mut h = Harness::new();
        let result = h.run(&FindCommand, &["/nope"]).await;
        assert_eq!(result.stderr, "find: '/nope': No such file or directory\n");
        let result = h.run(&FindCommand, &["-type", "x"]).await;
        assert_eq!(result.exit_code, 1);
    }
}
