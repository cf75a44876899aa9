use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};

pub struct UnameCommand;

const SYSTEM: &str = "CentralOS";
const MACHINE: &str = "virtual";

#[async_trait]
impl Command for UnameCommand {
    fn name(&self) -> &'static str {
        "uname"
    }

    fn description(&self) -> &'static str {
        "Print system information"
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let mut parts: Vec<String> = Vec::new();
        for arg in &ctx.args {
            match arg.as_str() {
                "-a" | "--all" => {
                    parts = vec![
                        SYSTEM.to_string(),
                        ctx.session.config.hostname.clone(),
                        env!("CARGO_PKG_VERSION").to_string(),
                        MACHINE.to_string(),
                    ];
                    break;
                }
                "-s" => parts.push(SYSTEM.to_string()),
                "-n" => parts.push(ctx.session.config.hostname.clone()),
                "-r" => parts.push(env!("CARGO_PKG_VERSION").to_string()),
                "-m" => parts.push(MACHINE.to_string()),
                _ => return CommandResult::error(format!("uname: invalid option '{}'\n", arg)),
            }
        }
        if parts.is_empty() {
            parts.push(SYSTEM.to_string());
        }
        CommandResult::success(format!("{}\n", parts.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[tokio::test]
    async fn test_uname() {
        let mut h = Harness::new();
        assert_eq!(h.run(&UnameCommand, &[]).await.stdout, "CentralOS\n");
        let all = h.run(&UnameCommand, &["-a"]).await.stdout;
        assert!(all.starts_with("CentralOS central-terminal "));
        assert_eq!(h.run(&UnameCommand, &["-n", "-m"]).await.stdout, "central-terminal virtual\n");
    }
}
