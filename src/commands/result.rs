use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct ResultCommand;

#[async_trait]
impl Command for ResultCommand {
    fn name(&self) -> &str {
        "/result"
    }

    fn description(&self) -> &str {
        "show the last simulation summary"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        match ctx.screen.render_result() {
            Some(text) => CommandResult::Show(text),
            None => CommandResult::Show("  no simulation yet, use /run\n".to_string()),
        }
    }
}
