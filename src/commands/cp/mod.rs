// src/commands/cp/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::VfsError;

pub struct CpCommand;

#[async_trait]
impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn description(&self) -> &'static str {
        "Copy files and directories"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut recursive = false;
        let mut paths: Vec<String> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "-r" | "-R" | "--recursive" => recursive = true,
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    return CommandResult::error(format!("cp: invalid option '{}'\n", arg));
                }
                _ => paths.push(arg.clone()),
            }
        }

        match paths.len() {
            0 => return CommandResult::error("cp: missing file operand\n".to_string()),
            1 => {
                return CommandResult::error(format!("cp: missing destination file operand after '{}'\n", paths[0]))
            }
            _ => {}
        }

        let (sources, dest) = paths.split_at(paths.len() - 1);
        let dest = &dest[0];
        let vfs = &mut ctx.session.vfs;

        if sources.len() > 1 && !vfs.resolve(dest).is_some_and(|n| n.is_directory()) {
            return CommandResult::error(format!("cp: target '{}' is not a directory\n", dest));
        }

        let mut stderr = String::new();
        for src in sources {
            match vfs.copy(src, dest, recursive) {
                Ok(()) => {}
                Err(VfsError::IsADirectory { ref path, .. }) if !recursive && *path == vfs.normalize(src) => {
                    stderr.push_str(&format!("cp: -r not specified; omitting directory '{}'\n", src));
                }
                Err(VfsError::InvalidArgument { .. }) => {
                    stderr.push_str(&format!("cp: cannot copy '{}' into itself, '{}'\n", src, dest));
                }
                Err(e) => {
                    stderr.push_str(&format!("cp: cannot copy '{}' to '{}': {}\n", src, dest, e.reason()));
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
    async fn test_cp_file() {
        let mut h = Harness::new();
        let result = h.run(&CpCommand, &["README.txt", "copy.txt"]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(h.session.vfs.read_file("copy.txt").unwrap(), "This is a README file.\n");
        assert!(h.session.vfs.resolve("README.txt").is_some());
    }

    #[tokio::test]
    async fn test_cp_into_directory() {
        let mut h = Harness::new();
        h.run(&CpCommand, &["/etc/motd", "/docs/guide.txt", "/tmp"]).await;
        assert_eq!(h.session.vfs.ls("/tmp").unwrap(), vec!["guide.txt", "motd"]);
    }

    #[tokio::test]
    async fn test_cp_directory_requires_r() {
        let mut h = Harness::new();
        let result = h.run(&CpCommand, &["/docs", "/tmp/docs"]).await;
        assert_eq!(result.stderr, "cp: -r not specified; omitting directory '/docs'\n");
        let result = h.run(&CpCommand, &["-r", "/docs", "/tmp/docs"]).await;
        assert_eq!(result.exit_code, 0);
        assert!(h.session.vfs.resolve("/tmp/docs/guide.txt").is_some());
    }

    #[tokio::test]
    async fn test_cp_into_itself() {
        let mut h = Harness::new();
        let result = h.run(&CpCommand, &["-r", "/docs", "/docs/sub"]).await;
        assert_eq!(result.exit_code, 1);
        assert_eq!(h.session.vfs.ls("/docs").unwrap(), vec!["guide.txt"]);
    }

    #[tokio::test]
    async fn test_cp_operands() {
        let mut h = Harness::new();
        let result = h.run(&CpCommand, &["a"]).await;
        assert_eq!(result.stderr, "cp: missing destination file operand after 'a'\n");
        let result = h.run(&CpCommand, &["/etc/motd", "/docs/guide.txt", "/etc/motd"]).await;
        assert_eq!(result.stderr, "cp: target '/etc/motd' is not a directory\n");
    }
}
