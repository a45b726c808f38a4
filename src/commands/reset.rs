use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn aliases(&self) -> &[&str] {
        &["/clear"]
    }

    fn description(&self) -> &str {
        "clear every input field"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        ctx.screen.reset();
        CommandResult::Handled
    }
}
