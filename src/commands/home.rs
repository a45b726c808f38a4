use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct HomeCommand;

#[async_trait]
impl Command for HomeCommand {
    fn name(&self) -> &str {
        "/home"
    }

    fn description(&self) -> &str {
        "show the simulator screen"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        CommandResult::Show(ctx.shell.render(&ctx.screen.render_home()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::fixture;

    #[tokio::test]
    async fn renders_form_inside_shell() {
        let fx = fixture();
        match HomeCommand.execute("", &fx.ctx()).await {
            CommandResult::Show(text) => {
                assert!(text.contains("Bond Investment Analysis Tool"));
                assert!(text.contains("📈 Bond Investment Simulator"));
                assert!(text.contains("monthly investment"));
                assert!(text.contains("© 2025 Pynecot AI Finance"));
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }
}
