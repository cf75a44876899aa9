// src/commands/stat_cmd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::NodeKind;

pub struct StatCommand;

#[async_trait]
impl Command for StatCommand {
    fn name(&self) -> &'static str {
        "stat"
    }

    fn description(&self) -> &'static str {
        "Display file status"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.is_empty() {
            return CommandResult::error("stat: missing operand\n".to_string());
        }

        let vfs = &ctx.session.vfs;
        let mut stdout = String::new();
        let mut stderr = String::new();

        for file in &ctx.args {
            match vfs.stat(file) {
                Ok(st) => {
                    let kind = match st.kind {
                        NodeKind::Directory => "directory".to_string(),
                        NodeKind::File => match st.file_type {
                            Some(t) => format!("{} file", t.as_str()),
                            None => "file".to_string(),
                        },
                    };
                    stdout.push_str(&format!("  File: {}\n", vfs.normalize(file)));
                    stdout.push_str(&format!("  Size: {}\t\tType: {}\n", st.size, kind));
                    stdout.push_str(&format!("Access: ({:04o})\n", st.mode));
                    if let Some(m) = st.modified_at {
                        stdout.push_str(&format!("Modify: {}\n", m.format("%Y-%m-%d %H:%M:%S%.3f UTC")));
                    }
                    if let Some(c) = st.created_at {
                        stdout.push_str(&format!(" Birth: {}\n", c.format("%Y-%m-%d %H:%M:%S%.3f UTC")));
                    }
                }
                Err(e) => stderr.push_str(&format!("stat: cannot stat '{}': {}\n", file, e.reason())),
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}
