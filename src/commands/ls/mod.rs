// src/commands/ls/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{FileType, Node, Vfs};

pub struct LsCommand;

const HELP: &str = "Usage: ls [-l] [PATH]...

List directory contents. Directories end in '/', executables in '*'.

Options:
  -l      use a long listing format
  --help  display this help and exit
";

fn format_mode(mode: u32, is_dir: bool) -> String {
    let mut s = String::with_capacity(10);
    s.push(if is_dir { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 4 != 0 { 'r' } else { '-' });
        s.push(if bits & 2 != 0 { 'w' } else { '-' });
        s.push(if bits & 1 != 0 { 'x' } else { '-' });
    }
    s
}

fn long_line(name: &str, node: &Node) -> String {
    match node {
        Node::Directory(d) => format!(
            "{} {:>6} {:>12} {}/",
            format_mode(0o755, true),
            d.children.len(),
            "-",
            name
        ),
        Node::File(f) => {
            let marker = if f.file_type == FileType::Executable { "*" } else { "" };
            format!(
                "{} {:>6} {:>12} {}{}",
                format_mode(f.mode, false),
                f.content.len(),
                f.modified_at.format("%b %e %H:%M"),
                name,
                marker
            )
        }
    }
}

fn list_one(vfs: &Vfs, operand: &str, long: bool) -> Result<String, String> {
    let mut out = String::new();
    match vfs.resolve(operand) {
        Some(Node::Directory(dir)) => {
            if long {
                for (name, node) in &dir.children {
                    out.push_str(&long_line(name, node));
                    out.push('\n');
                }
            } else {
                let names = vfs.ls(operand).map_err(|e| format!("ls: {}: {}\n", operand, e.reason()))?;
                for name in names {
                    out.push_str(&name);
                    out.push('\n');
                }
            }
        }
        Some(node) => {
            if long {
                out.push_str(&long_line(operand, node));
            } else {
                out.push_str(operand);
            }
            out.push('\n');
        }
        None => return Err(format!("ls: cannot access '{}': No such file or directory\n", operand)),
    }
    Ok(out)
}

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static str {
        "List directory contents"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut long = false;
        let mut paths: Vec<String> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "--help" => return CommandResult::success(HELP.to_string()),
                _ if arg.starts_with('-') && arg.len() > 1 => {
                    for c in arg.chars().skip(1) {
                        match c {
                            'l' => long = true,
                            // no hidden entries to reveal
                            'a' => {}
                            _ => return CommandResult::error(format!("ls: invalid option -- '{}'\n", c)),
                        }
                    }
                }
                _ => paths.push(arg.clone()),
            }
        }
        if paths.is_empty() {
            paths.push(".".to_string());
        }

        let vfs = &ctx.session.vfs;
        let mut stdout = String::new();
        let mut stderr = String::new();
        let show_headers = paths.len() > 1;

        for (i, p) in paths.iter().enumerate() {
            match list_one(vfs, p, long) {
                Ok(listing) => {
                    if show_headers {
                        if i > 0 {
                            stdout.push('\n');
                        }
                        stdout.push_str(&format!("{}:\n", p));
                    }
                    stdout.push_str(&listing);
                }
                Err(e) => stderr.push_str(&e),
            }
        }

        let exit_code = if stderr.is_empty() { 0 } else { 2 };
        CommandResult::with_exit_code(stdout, stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[test]
    fn test_format_mode() {
        assert_eq!(format_mode(0o644, false), "-rw-r--r--");
        assert_eq!(format_mode(0o755, true), "drwxr-xr-x");
    }

    #[tokio::test]
    async fn test_ls_root() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["/"]).await;
        assert_eq!(result.stdout, "bin/\ndocs/\netc/\nhome/\ntmp/\n");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_ls_cwd_marks_executables() {
        let mut h = Harness::new();
        h.session.vfs.chdir("/bin").unwrap();
        let result = h.run(&LsCommand, &[]).await;
        assert_eq!(result.stdout, "edit*\nrps*\n");
    }

    #[tokio::test]
    async fn test_ls_empty_dir() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["/tmp"]).await;
        assert_eq!(result.stdout, "");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_ls_missing() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["/nope"]).await;
        assert_eq!(result.stderr, "ls: cannot access '/nope': No such file or directory\n");
        assert_eq!(result.exit_code, 2);
    }

    #[tokio::test]
    async fn test_ls_file_operand() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["/etc/motd"]).await;
        assert_eq!(result.stdout, "/etc/motd\n");
    }

    #[tokio::test]
    async fn test_ls_long() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["-l", "/bin"]).await;
        let lines: Vec<&str> = result.stdout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("-rwxr-xr-x"));
        assert!(lines[0].ends_with(" edit*"));
    }

    #[tokio::test]
    async fn test_ls_multiple_headers() {
        let mut h = Harness::new();
        let result = h.run(&LsCommand, &["/tmp", "/etc"]).await;
        assert_eq!(result.stdout, "/tmp:\n\n/etc:\nmotd\n");
    }
}
