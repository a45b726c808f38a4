use async_trait::async_trait;

use super::{Command, CommandContext, CommandResult};
use crate::screen::SubmitOutcome;

pub struct RunCommand;

#[async_trait]
impl Command for RunCommand {
    fn name(&self) -> &str {
        "/run"
    }

    fn aliases(&self) -> &[&str] {
        &["/simulate"]
    }

    fn description(&self) -> &str {
        "send the inputs to the simulation server"
    }

    async fn execute(&self, _args: &str, ctx: &CommandContext<'_>) -> CommandResult {
        if ctx.screen.is_busy() {
            return CommandResult::Show("  … a simulation is already running\n".to_string());
        }
        match ctx.screen.submit().await {
            SubmitOutcome::Completed => match ctx.screen.render_result() {
                Some(text) => CommandResult::Show(text),
                None => CommandResult::Handled,
            },
            SubmitOutcome::Failed(_) | SubmitOutcome::Superseded => CommandResult::Handled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockSimulator;
    use crate::commands::tests::{Fixture, fixture};
    use crate::error::SimulateError;
    use crate::form::Field;
    use crate::notify::{Notice, drain};

    #[tokio::test]
    async fn success_shows_summary() {
        let fx = fixture();
        let mut rx = fx.bus.subscribe();
        fx.screen.set_field(Field::MonthlyInvestment, "1000");

        match RunCommand.execute("", &fx.ctx()).await {
            CommandResult::Show(text) => {
                assert!(text.contains("Total Invested: $3,000.00"));
                assert!(text.contains("Duration: 60 months"));
            }
            other => panic!("expected Show, got {other:?}"),
        }
        assert_eq!(drain(&mut rx), vec![Notice::SimulationComplete]);
        assert!(fx.screen.state().inputs.is_empty());
    }

    #[tokio::test]
    async fn failure_only_notifies() {
        let fx = Fixture::new(MockSimulator::new(vec![Err(SimulateError::Transport(
            "connection refused".to_string(),
        ))]));
        let mut rx = fx.bus.subscribe();
        fx.screen.set_field(Field::MonthlyInvestment, "1000");

        assert_eq!(RunCommand.execute("", &fx.ctx()).await, CommandResult::Handled);
        assert_eq!(drain(&mut rx), vec![Notice::SimulationFailed]);
        assert_eq!(fx.screen.state().inputs.monthly_investment, "1000");
    }
}
