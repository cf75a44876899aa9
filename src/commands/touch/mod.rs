// src/commands/touch/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct TouchCommand;

#[async_trait]
impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn description(&self) -> &'static str {
        "Create an empty file or update its timestamp"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.is_empty() {
            return CommandResult::error("touch: missing file operand\n".to_string());
        }

        let vfs = &mut ctx.session.vfs;
        let mut stderr = String::new();
        for file in &ctx.args {
            if file.is_empty() {
                stderr.push_str("touch: cannot touch '': No such file or directory\n");
                continue;
            }
            if let Err(e) = vfs.touch(file) {
                stderr.push_str(&format!("touch: cannot touch '{}': {}\n", file, e.reason()));
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_touch_creates() {
        let mut h = Harness::new();
        let result = h.run(&TouchCommand, &["a.txt", "b.txt"]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(h.session.vfs.read_file("a.txt").unwrap(), "");
        assert!(h.session.vfs.resolve("/home/user/b.txt").is_some());
    }

    #[tokio::test]
    async fn test_touch_existing_keeps_content() {
        let mut h = Harness::new();
        h.run(&TouchCommand, &["README.txt"]).await;
        assert_eq!(h.session.vfs.read_file("README.txt").unwrap(), "This is a README file.\n");
    }

    #[tokio::test]
    async fn test_touch_errors() {
        let mut h = Harness::new();
        let result = h.run(&TouchCommand, &["/etc/motd/x"]).await;
        assert_eq!(result.stderr, "touch: cannot touch '/etc/motd/x': Not a directory\n");
        let result = h.run(&TouchCommand, &[]).await;
        assert_eq!(result.stderr, "touch: missing file operand\n");
    }
}
