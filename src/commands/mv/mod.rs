// src/commands/mv/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::VfsError;

pub struct MvCommand;

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn description(&self) -> &'static str {
        "Move or rename files"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let paths: Vec<String> = ctx.args.iter().filter(|a| !a.starts_with('-') || a.len() == 1).cloned().collect();

        match paths.len() {
            0 => return CommandResult::error("mv: missing file operand\n".to_string()),
            1 => {
                return CommandResult::error(format!("mv: missing destination file operand after '{}'\n", paths[0]))
            }
            _ => {}
        }

        let (sources, dest) = paths.split_at(paths.len() - 1);
        let dest = &dest[0];
        let vfs = &mut ctx.session.vfs;

        if sources.len() > 1 && !vfs.resolve(dest).is_some_and(|n| n.is_directory()) {
            return CommandResult::error(format!("mv: target '{}' is not a directory\n", dest));
        }

        let mut stderr = String::new();
        for src in sources {
            match vfs.rename(src, dest) {
                Ok(()) => {}
                Err(VfsError::InvalidArgument { .. }) => {
                    stderr.push_str(&format!("mv: cannot move '{}' to a subdirectory of itself, '{}'\n", src, dest));
                }
                Err(e) => {
                    stderr.push_str(&format!("mv: cannot move '{}' to '{}': {}\n", src, dest, e.reason()));
                }
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
    async fn test_mv_rename() {
        let mut h = Harness::new();
        let result = h.run(&MvCommand, &["README.txt", "readme.md"]).await;
        assert_eq!(result.exit_code, 0);
        assert!(h.session.vfs.resolve("README.txt").is_none());
        assert_eq!(h.session.vfs.read_file("readme.md").unwrap(), "This is a README file.\n");
    }

    #[tokio::test]
    async fn test_mv_into_directory() {
        let mut h = Harness::new();
        h.run(&MvCommand, &["README.txt", "/tmp"]).await;
        assert!(h.session.vfs.resolve("/tmp/README.txt").is_some());
    }

    #[tokio::test]
    async fn test_mv_into_itself() {
        let mut h = Harness::new();
        let result = h.run(&MvCommand, &["/docs", "/docs/inner"]).await;
        assert_eq!(result.stderr, "mv: cannot move '/docs' to a subdirectory of itself, '/docs/inner'\n");
        assert!(h.session.vfs.resolve("/docs/guide.txt").is_some());
    }

    #[tokio::test]
    async fn test_mv_missing() {
        let mut h = Harness::new();
        let result = h.run(&MvCommand, &["nope", "/tmp"]).await;
        assert_eq!(result.stderr, "mv: cannot move 'nope' to '/tmp': No such file or directory\n");
    }

    #[tokio::test]
    async fn test_mv_cwd_follows() {
        let mut h = Harness::new();
        h.session.vfs.chdir("/docs").unwrap();
        h.run(&MvCommand, &["/docs", "/manuals"]).await;
        assert_eq!(h.session.vfs.cwd(), "/manuals");
    }
}
