use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

/// Listed by the registry, which renders the help text itself.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show available commands"
    }

    async fn execute(&self, _args: &str, _ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Handled
    }
}
