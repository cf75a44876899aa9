use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{Directory, Node};

pub struct TreeCommand;

#[derive(Default)]
struct Counts {
    dirs: usize,
    files: usize,
}

fn render(dir: &Directory, prefix: &str, out: &mut String, counts: &mut Counts) {
    let total = dir.children.len();
    for (i, (name, node)) in dir.children.iter().enumerate() {
        let last = i + 1 == total;
        let connector = if last { "└── " } else { "├── " };
        match node {
            Node::Directory(d) => {
                counts.dirs += 1;
                out.push_str(&format!("{}{}{}/\n", prefix, connector, name));
                let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
                render(d, &next, out, counts);
            }
            Node::File(_) => {
                counts.files += 1;
                out.push_str(&format!("{}{}{}\n", prefix, connector, name));
            }
        }
    }
}

#[async_trait]
impl Command for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn description(&self) -> &'static str {
        "Display the directory structure as a tree"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let operand = ctx.args.first().map(String::as_str).unwrap_or(".");
        let vfs = &ctx.session.vfs;
        let abs = vfs.normalize(operand);
        let dir = match vfs.resolve(&abs) {
            Some(Node::Directory(d)) => d,
            Some(Node::File(_)) => {
                return CommandResult::error(format!("tree: '{}' is not a directory\n", operand));
            }
            None => return CommandResult::error(format!("tree: '{}': No such file or directory\n", operand)),
        };

        let mut out = format!("{}\n", abs);
        let mut counts = Counts::default();
        render(dir, "", &mut out, &mut counts);
        out.push_str(&format!(
            "\n{} {}, {} {}\n",
            counts.dirs,
            if counts.dirs == 1 { "directory" } else { "directories" },
            counts.files,
            if counts.files == 1 { "file" } else { "files" }
        ));
        CommandResult::success(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::fs::FileType;

    #[tokio::test]
    async fn test_tree_layout() {
        let mut h = Harness::new();
        h.session.vfs.write_file("/t/a/x.txt", "", FileType::Text, true).unwrap();
        h.session.vfs.write_file("/t/b.txt", "", FileType::Text, true).unwrap();
        let result = h.run(&TreeCommand, &["/t"]).await;
        assert_eq!(
            result.stdout,
            "/t\n├── a/\n│   └── x.txt\n└── b.txt\n\n1 directory, 2 files\n"
        );
    }

    #[tokio::test]
    async fn test_tree_not_directory() {
        let mut h = Harness::new();
        let result = h.run(&TreeCommand, &["/etc/motd"]).await;
        assert_eq!(result.stderr, "tree: '/etc/motd' is not a directory\n");
    }
}
