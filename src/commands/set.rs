use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};
use crate::form::parse_assignment;

pub struct SetCommand;

#[async_trait]
impl Command for SetCommand {
    fn name(&self) -> &str {
        "/set"
    }

    fn args(&self) -> &str {
        "<field> <value>"
    }

    fn description(&self) -> &str {
        "edit one input field"
    }

    async fn execute(&self, args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        match parse_assignment(args) {
            Ok((field, value)) => {
                ctx.screen.set_field(field, value);
                CommandResult::Handled
            }
            Err(e) => CommandResult::Show(format!("  ✗ {e}\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::fixture;

    #[tokio::test]
    async fn sets_named_field() {
        let fx = fixture();
        assert_eq!(
            SetCommand.execute("monthly_investment 5600", &fx.ctx()).await,
            CommandResult::Handled
        );
        assert_eq!(fx.screen.state().inputs.monthly_investment, "5600");
    }

    #[tokio::test]
    async fn sets_field_by_label() {
        let fx = fixture();
        SetCommand.execute("monthly investment 5600", &fx.ctx()).await;
        assert_eq!(fx.screen.state().inputs.monthly_investment, "5600");
    }

    #[tokio::test]
    async fn unknown_field_leaves_form_alone() {
        let fx = fixture();
        let result = SetCommand.execute("rate 5", &fx.ctx()).await;
        assert!(matches!(result, CommandResult::Show(ref t) if t.contains("unknown field")));
        assert!(fx.screen.state().inputs.is_empty());
    }
}
