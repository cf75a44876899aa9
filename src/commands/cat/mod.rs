// src/commands/cat/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{File, FileType, Node};
use crate::output::Output;

pub struct CatCommand;

pub(crate) fn image_markup(file: &File) -> String {
    format!("<img src=\"{}\" alt=\"{}\">", file.content, file.name)
}

/// Write pending text before a markup line so the order is preserved.
fn flush(out: &mut Output, pending: &mut String) {
    if !pending.is_empty() {
        out.text(std::mem::take(pending));
    }
}

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static str {
        "Display file contents"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.is_empty() {
            return CommandResult::error("Usage: cat <file>...\n".to_string());
        }

        let session = ctx.session;
        let mut stdout = String::new();
        let mut stderr = String::new();

        for arg in &ctx.args {
            let file = match session.vfs.resolve(arg) {
                Some(Node::File(f)) => f,
                Some(Node::Directory(_)) => {
                    stderr.push_str(&format!("cat: {}: Is a directory\n", arg));
                    continue;
                }
                None => {
                    stderr.push_str(&format!("cat: {}: No such file or directory\n", arg));
                    continue;
                }
            };
            match file.file_type {
                FileType::Text => {
                    stdout.push_str(&file.content);
                    if !file.content.is_empty() && !file.content.ends_with('\n') {
                        stdout.push('\n');
                    }
                }
                FileType::Image => {
                    flush(&mut session.out, &mut stdout);
                    session.out.markup(image_markup(file));
                }
                FileType::Audio => {
                    let html = format!(
                        "<audio controls src=\"{}\">Your browser does not support audio playback.</audio>",
                        file.content
                    );
                    flush(&mut session.out, &mut stdout);
                    session.out.markup(html);
                }
                FileType::Executable => {
                    stdout.push_str(&format!("[Executable] To run this, type: run {}\n", file.content));
                }
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 1 };
        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::output::OutputLine;

    #[tokio::test]
    async fn test_cat_text() {
        let mut h = Harness::new();
        let result = h.run(&CatCommand, &["/etc/motd"]).await;
        assert_eq!(result.stdout, "Welcome to the Central Terminal!\n");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_cat_adds_missing_newline() {
        let mut h = Harness::new();
        h.session.vfs.write_file("a", "x", FileType::Text, true).unwrap();
        h.session.vfs.write_file("b", "y", FileType::Text, true).unwrap();
        let result = h.run(&CatCommand, &["a", "b"]).await;
        assert_eq!(result.stdout, "x\ny\n");
    }

    #[tokio::test]
    async fn test_cat_executable() {
        let mut h = Harness::new();
        let result = h.run(&CatCommand, &["/bin/rps"]).await;
        assert_eq!(result.stdout, "[Executable] To run this, type: run rps\n");
    }

    #[tokio::test]
    async fn test_cat_audio_is_markup() {
        let mut h = Harness::new();
        h.session.vfs.write_file("song", "a.mp3", FileType::Audio, true).unwrap();
        let result = h.run(&CatCommand, &["song"]).await;
        assert!(result.stdout.is_empty());
        match &h.sink.lines()[0] {
            OutputLine::Markup(m) => assert!(m.starts_with("<audio controls src=\"a.mp3\"")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cat_errors() {
        let mut h = Harness::new();
        let result = h.run(&CatCommand, &["/tmp", "nope"]).await;
        assert_eq!(result.stderr, "cat: /tmp: Is a directory\ncat: nope: No such file or directory\n");
        assert_eq!(result.exit_code, 1);
    }
}
