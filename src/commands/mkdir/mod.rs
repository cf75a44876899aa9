// src/commands/mkdir/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct MkdirCommand;

#[async_trait]
impl Command for MkdirCommand {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn description(&self) -> &'static str {
        "Create directories"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.iter().any(|a| a == "--help") {
            return CommandResult::success(
                "Usage: mkdir [-p] DIRECTORY...\n\n\
                 Create the DIRECTORY(ies), if they do not already exist.\n\n\
                 Options:\n\
                   -p, --parents    no error if existing, make parent directories as needed\n"
                    .to_string(),
            );
        }

        let mut recursive = false;
        let mut dirs: Vec<String> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "-p" | "--parents" => recursive = true,
                _ if !arg.starts_with('-') => dirs.push(arg.clone()),
                _ => return CommandResult::error(format!("mkdir: invalid option '{}'\n", arg)),
            }
        }

        if dirs.is_empty() {
            return CommandResult::error("mkdir: missing operand\n".to_string());
        }

        let vfs = &mut ctx.session.vfs;
        let mut stderr = String::new();

        for dir in &dirs {
            let result = if recursive { vfs.mkdir_recursive(dir) } else { vfs.mkdir(dir) };
            if let Err(e) = result {
                stderr.push_str(&format!("mkdir: cannot create directory '{}': {}\n", dir, e.reason()));
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
    async fn test_mkdir_simple() {
        let mut h = Harness::new();
        let result = h.run(&MkdirCommand, &["projects", "/tmp/x"]).await;
        assert_eq!(result.exit_code, 0);
        assert!(h.session.vfs.resolve("/home/user/projects").unwrap().is_directory());
        assert!(h.session.vfs.resolve("/tmp/x").is_some());
    }

    #[tokio::test]
    async fn test_mkdir_missing_parent() {
        let mut h = Harness::new();
        let before = h.session.vfs.ls("/tmp").unwrap();
        let result = h.run(&MkdirCommand, &["/tmp/a/b"]).await;
        assert_eq!(result.stderr, "mkdir: cannot create directory '/tmp/a/b': No such file or directory\n");
        assert_eq!(result.exit_code, 1);
        assert_eq!(h.session.vfs.ls("/tmp").unwrap(), before);
    }

    #[tokio::test]
    async fn test_mkdir_exists() {
        let mut h = Harness::new();
        let result = h.run(&MkdirCommand, &["/tmp"]).await;
        assert_eq!(result.stderr, "mkdir: cannot create directory '/tmp': File exists\n");
    }

    #[tokio::test]
    async fn test_mkdir_parents() {
        let mut h = Harness::new();
        let result = h.run(&MkdirCommand, &["-p", "/tmp/a/b/c", "/tmp"]).await;
        assert_eq!(result.exit_code, 0);
        assert!(h.session.vfs.resolve("/tmp/a/b/c").is_some());
    }

    #[tokio::test]
    async fn test_mkdir_no_operand() {
        let mut h = Harness::new();
        let result = h.run(&MkdirCommand, &[]).await;
        assert_eq!(result.stderr, "mkdir: missing operand\n");
    }
}
