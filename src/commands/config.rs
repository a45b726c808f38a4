use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn name(&self) -> &str {
        "/config"
    }

    fn description(&self) -> &str {
        "show the settings in effect"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        let s = ctx.settings;
        CommandResult::Show(format!(
            "  endpoint  {}\n  rate      {} ZMW / USD\n  timeout   {}\n  settings  {}\n",
            s.api_url,
            s.exchange_rate,
            s.timeout_label(),
            ctx.settings_path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::fixture;
    use crate::consts::DEFAULT_API_URL;

    #[tokio::test]
    async fn shows_effective_settings() {
        let fx = fixture();
        match ConfigCommand.execute("", &fx.ctx()).await {
            CommandResult::Show(text) => {
                assert!(text.contains(DEFAULT_API_URL));
                assert!(text.contains("28 ZMW / USD"));
                assert!(text.contains("timeout   none"));
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }
}
