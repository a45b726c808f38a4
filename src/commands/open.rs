use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct OpenCommand;

#[async_trait]
impl Command for OpenCommand {
    fn name(&self) -> &str {
        "/open"
    }

    fn description(&self) -> &str {
        "open the full simulation file"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        // Failures surface as notices raised by the screen.
        match ctx.screen.open_artifact(ctx.opener) {
            Ok(url) => CommandResult::Show(format!("  opened {url}\n")),
            Err(_) => CommandResult::Handled,
        }
    }
}
