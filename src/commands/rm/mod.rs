// src/commands/rm/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::VfsError;

pub struct RmCommand;

#[async_trait]
impl Command for RmCommand {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn description(&self) -> &'static str {
        "Remove files or directories"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut recursive = false;
        let mut force = false;
        let mut files: Vec<String> = Vec::new();

        for arg in &ctx.args {
            if arg.starts_with('-') && arg.len() > 1 {
                for c in arg.chars().skip(1) {
                    match c {
                        'r' | 'R' => recursive = true,
                        'f' => force = true,
                        _ => return CommandResult::error(format!("rm: invalid option -- '{}'\n", c)),
                    }
                }
            } else {
                files.push(arg.clone());
            }
        }

        if files.is_empty() {
            if force {
                return CommandResult::empty();
            }
            return CommandResult::error("rm: missing operand\n".to_string());
        }

        let vfs = &mut ctx.session.vfs;
        let mut stderr = String::new();

        for file in &files {
            let result = if recursive { vfs.remove_all(file) } else { vfs.unlink(file) };
            match result {
                Ok(()) => {}
                Err(VfsError::NotFound { .. }) if force => {}
                Err(VfsError::InvalidArgument { .. }) => {
                    stderr.push_str(&format!("rm: refusing to remove '{}'\n", file));
                }
                Err(e) => {
                    stderr.push_str(&format!("rm: cannot remove '{}': {}\n", file, e.reason()));
                }
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}
