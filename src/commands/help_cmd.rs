use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "List available commands"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["?"]
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if let Some(topic) = ctx.args.first() {
            return match ctx.commands.get(topic) {
                Some(cmd) => {
                    let mut stdout = format!("{} - {}\n", cmd.name(), cmd.description());
                    if !cmd.aliases().is_empty() {
                        stdout.push_str(&format!("Aliases: {}\n", cmd.aliases().join(", ")));
                    }
                    CommandResult::success(stdout)
                }
                None => CommandResult::error(format!("help: no help topics match '{}'\n", topic)),
            };
        }

        let mut stdout = String::new();
        for cmd in ctx.commands.list() {
            stdout.push_str(&format!("{:<15}- {}\n", cmd.name(), cmd.description()));
        }

        let addons = ctx.session.addons.list();
        if !addons.is_empty() {
            stdout.push_str("\nAddons (start with 'run <name>'):\n");
            for (name, description) in addons {
                stdout.push_str(&format!("{:<15}- {}\n", name, description));
            }
        }

        CommandResult::success(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_help_lists_each_command_once() {
        let mut h = Harness::new();
        let r = h.run(&HelpCommand, &[]).await;
        assert!(r.stdout.contains("cd             - Change directory\n"));
        assert_eq!(r.stdout.matches("- Displays the current date and time.").count(), 1);
        assert!(!r.stdout.starts_with("?"));
        assert!(r.stdout.contains("editor         - Line editor for text files\n"));
    }

    #[tokio::test]
    async fn test_help_topic() {
        let mut h = Harness::new();
        let r = h.run(&HelpCommand, &["TIME"]).await;
        assert_eq!(r.stdout, "date - Displays the current date and time.\nAliases: time\n");
        let r = h.run(&HelpCommand, &["frobnicate"]).await;
        assert_eq!(r.stderr, "help: no help topics match 'frobnicate'\n");
    }
}
