// src/commands/mod.rs
pub mod cat;
pub mod cd_cmd;
pub mod clear_cmd;
pub mod cp;
pub mod date;
pub mod echo;
pub mod find;
pub mod help_cmd;
pub mod history_cmd;
pub mod hostname_cmd;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod pwd;
pub mod registry;
pub mod render_cmd;
pub mod reset_cmd;
pub mod rm;
pub mod rmdir_cmd;
pub mod run_cmd;
pub mod sleep_cmd;
pub mod stat_cmd;
pub mod tokenizer;
pub mod top_cmd;
pub mod touch;
pub mod tree_cmd;
pub mod types;
pub mod uname_cmd;
pub mod uptime_cmd;
pub mod whoami_cmd;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use registry::CommandRegistry;
pub use tokenizer::tokenize;
pub use types::{Command, CommandContext, CommandFn, CommandResult, FnCommand};

/// Register every built-in command.
pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(Arc::new(pwd::PwdCommand));
    registry.register(Arc::new(ls::LsCommand));
    registry.register(Arc::new(cd_cmd::CdCommand));
    registry.register(Arc::new(cat::CatCommand));
    registry.register(Arc::new(render_cmd::RenderCommand));
    registry.register(Arc::new(mkdir::MkdirCommand));
    registry.register(Arc::new(rmdir_cmd::RmdirCommand));
    registry.register(Arc::new(touch::TouchCommand));
    registry.register(Arc::new(rm::RmCommand));
    registry.register(Arc::new(cp::CpCommand));
    registry.register(Arc::new(mv::MvCommand));
    registry.register(Arc::new(find::FindCommand));
    registry.register(Arc::new(tree_cmd::TreeCommand));
    registry.register(Arc::new(stat_cmd::StatCommand));
    registry.register(Arc::new(echo::EchoCommand));
    registry.register(Arc::new(history_cmd::HistoryCommand));
    registry.register(Arc::new(date::DateCommand));
    registry.register(Arc::new(clear_cmd::ClearCommand));
    registry.register(Arc::new(help_cmd::HelpCommand));
    registry.register(Arc::new(whoami_cmd::WhoamiCommand));
    registry.register(Arc::new(hostname_cmd::HostnameCommand));
    registry.register(Arc::new(uname_cmd::UnameCommand));
    registry.register(Arc::new(uptime_cmd::UptimeCommand));
    registry.register(Arc::new(run_cmd::RunCommand));
    registry.register(Arc::new(run_cmd::EditCommand));
    registry.register(Arc::new(run_cmd::RpsCommand));
    registry.register(Arc::new(run_cmd::ExitCommand));
    registry.register(Arc::new(sleep_cmd::SleepCommand));
    registry.register(Arc::new(top_cmd::TopCommand));
    registry.register(Arc::new(reset_cmd::ResetCommand));
}

/// Registry holding every built-in command.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    registry
}
