use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct FormCommand;

#[async_trait]
impl Command for FormCommand {
    fn name(&self) -> &str {
        "/form"
    }

    fn aliases(&self) -> &[&str] {
        &["/fields"]
    }

    fn description(&self) -> &str {
        "show the current inputs"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Show(ctx.screen.render_form())
    }
}
