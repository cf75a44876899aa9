//! Line editor addon
//!
//! Every input line is appended to the buffer except the editor commands:
//! `:w` save, `:wq` save and exit, `:q` exit, `:p` print the buffer.
//! `Ctrl+S` and `Ctrl+X` are accepted as spellings of `:w` and `:q`.

use super::{Addon, AddonContext};
use crate::fs::{FileType, Node};

const RULE: &str = "--------------------------------------------------";

#[derive(Debug, Default)]
pub struct EditorAddon {
    path: String,
    buffer: Vec<String>,
}

impl EditorAddon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently held by the editor.
    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    fn content(&self) -> String {
        self.buffer.iter().map(|l| format!("{}\n", l)).collect()
    }

    fn save(&self, ctx: &mut AddonContext<'_>) {
        let content = self.content();
        match ctx.vfs.write_file(&self.path, &content, FileType::Text, true) {
            Ok(()) => ctx.out.text(format!("File saved: {} ({} lines)", self.path, self.buffer.len())),
            Err(e) => ctx.out.error(format!("Error saving file: {}", e.reason())),
        }
    }
}

impl Addon for EditorAddon {
    fn name(&self) -> &'static str {
        "editor"
    }

    fn description(&self) -> &'static str {
        "Line editor for text files"
    }

    fn start(&mut self, ctx: &mut AddonContext<'_>, args: &[String]) {
        self.buffer.clear();
        let Some(target) = args.first() else {
            ctx.out.text("Usage: edit <filename>");
            ctx.request_exit();
            return;
        };
        self.path = ctx.vfs.normalize(target);

        match ctx.vfs.resolve(&self.path) {
            Some(Node::Directory(_)) => {
                ctx.out.error(format!("edit: {}: Is a directory", self.path));
                ctx.request_exit();
                return;
            }
            Some(Node::File(f)) => {
                self.buffer = f.content.lines().map(str::to_string).collect();
            }
            None => {}
        }

        ctx.out.text(format!("Editing {}. Type :w to save, :wq to save and exit, :q to exit.", self.path));
        ctx.out.text(RULE);
        for line in &self.buffer {
            ctx.out.text(line);
        }
        ctx.out.text(RULE);
    }

    fn handle_input(&mut self, ctx: &mut AddonContext<'_>, line: &str) {
        match line.trim() {
            ":w" | "Ctrl+S" => self.save(ctx),
            ":wq" => {
                self.save(ctx);
                ctx.request_exit();
            }
            ":q" | "Ctrl+X" => {
                ctx.out.text("Exiting editor.");
                ctx.request_exit();
            }
            ":p" => {
                for (i, l) in self.buffer.iter().enumerate() {
                    ctx.out.text(format!("{:4}  {}", i + 1, l));
                }
            }
            _ => self.buffer.push(line.to_string()),
        }
    }

    fn stop(&mut self, _ctx: &mut AddonContext<'_>) {
        self.buffer.clear();
        self.path.clear();
    }
}
