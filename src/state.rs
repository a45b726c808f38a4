//! View state as a value, advanced only by [`update`].
//!
//! Every transition is a named [`Event`]. Completion events carry the id of
//! the request they answer; an answer for anything but the current in-flight
//! request is dropped, so a superseded submission can never overwrite newer
//! state.

use crate::client::SimulationResult;
use crate::form::{Field, InputSet};
use crate::notify::Notice;

/// Identifies one submission.
pub type RequestId = u64;

/// A result paired permanently with the inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub used_inputs: InputSet,
    pub result: SimulationResult,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Submission {
    #[default]
    Idle,
    InFlight {
        request: RequestId,
        snapshot: InputSet,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub inputs: InputSet,
    pub submission: Submission,
    pub last: Option<Completed>,
}

impl ViewState {
    pub fn is_busy(&self) -> bool {
        matches!(self.submission, Submission::InFlight { .. })
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        match self.submission {
            Submission::InFlight { request, .. } => Some(request),
            Submission::Idle => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FieldEdited { field: Field, value: String },
    FormReset,
    /// Freezes the current inputs for `request`. Replaces any earlier
    /// in-flight request.
    SubmitStarted { request: RequestId },
    SubmitSucceeded {
        request: RequestId,
        result: SimulationResult,
    },
    SubmitFailed { request: RequestId },
    /// The submission was abandoned; inputs stay, no notice.
    SubmitCancelled { request: RequestId },
}

/// New state plus the notice the transition raises, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub notice: Option<Notice>,
    /// `false` when the event was a stale completion and had no effect.
    pub applied: bool,
}

impl Transition {
    fn applied(state: ViewState, notice: Option<Notice>) -> Self {
        Self {
            state,
            notice,
            applied: true,
        }
    }

    fn ignored(state: ViewState) -> Self {
        Self {
            state,
            notice: None,
            applied: false,
        }
    }
}

pub fn update(state: ViewState, event: Event) -> Transition {
    match event {
        Event::FieldEdited { field, value } => {
            let mut inputs = state.inputs;
            inputs.set_field(field, value);
            Transition::applied(ViewState { inputs, ..state }, None)
        }

        Event::FormReset => Transition::applied(
            ViewState {
                inputs: InputSet::empty(),
                ..state
            },
            None,
        ),

        Event::SubmitStarted { request } => {
            let snapshot = state.inputs.clone();
            Transition::applied(
                ViewState {
                    submission: Submission::InFlight { request, snapshot },
                    ..state
                },
                None,
            )
        }

        Event::SubmitSucceeded { request, result } => match state.submission {
            Submission::InFlight {
                request: current,
                snapshot,
            } if current == request => Transition::applied(
                ViewState {
                    inputs: InputSet::empty(),
                    submission: Submission::Idle,
                    last: Some(Completed {
                        used_inputs: snapshot,
                        result,
                    }),
                },
                Some(Notice::SimulationComplete),
            ),
            submission => Transition::ignored(ViewState { submission, ..state }),
        },

        Event::SubmitFailed { request } => {
            if state.in_flight() == Some(request) {
                Transition::applied(
                    ViewState {
                        submission: Submission::Idle,
                        ..state
                    },
                    Some(Notice::SimulationFailed),
                )
            } else {
                Transition::ignored(state)
            }
        }

        Event::SubmitCancelled { request } => {
            if state.in_flight() == Some(request) {
                Transition::applied(
                    ViewState {
                        submission: Submission::Idle,
                        ..state
                    },
                    None,
                )
            } else {
                Transition::ignored(state)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(months: u32) -> SimulationResult {
        SimulationResult {
            total_invested: 84000.0,
            total_interest: 16000.0,
            duration_months: months,
            excel_url: None,
        }
    }

    fn edited(state: ViewState, field: Field, value: &str) -> ViewState {
        update(
            state,
            Event::FieldEdited {
                field,
                value: value.to_string(),
            },
        )
        .state
    }

    fn typed() -> ViewState {
        let state = ViewState::default();
        let state = edited(state, Field::MonthlyInvestment, "1000");
        edited(state, Field::StartYear, "2024")
    }

    #[test]
    fn edit_changes_one_field() {
        let state = typed();
        assert_eq!(state.inputs.monthly_investment, "1000");
        assert_eq!(state.inputs.start_year, "2024");
        assert_eq!(state.inputs.investment_years, "");
    }

    #[test]
    fn reset_clears_inputs_but_keeps_result() {
        let state = ViewState {
            last: Some(Completed {
                used_inputs: InputSet::empty(),
                result: result(1),
            }),
            ..typed()
        };
        let next = update(state, Event::FormReset);
        assert!(next.state.inputs.is_empty());
        assert!(next.state.last.is_some());
        assert!(next.notice.is_none());
    }

    #[test]
    fn submit_started_freezes_inputs() {
        let state = typed();
        let before = state.inputs.clone();
        let next = update(state, Event::SubmitStarted { request: 1 });
        assert!(next.state.is_busy());
        assert_eq!(
            next.state.submission,
            Submission::InFlight {
                request: 1,
                snapshot: before
            }
        );
    }

    #[test]
    fn success_pairs_snapshot_with_result_and_resets() {
        let state = typed();
        let before = state.inputs.clone();
        let state = update(state, Event::SubmitStarted { request: 1 }).state;
        // Edits during the flight do not leak into the snapshot.
        let state = edited(state, Field::MonthlyInvestment, "9999");

        let next = update(
            state,
            Event::SubmitSucceeded {
                request: 1,
                result: result(60),
            },
        );

        assert!(next.applied);
        assert_eq!(next.notice, Some(Notice::SimulationComplete));
        assert!(!next.state.is_busy());
        assert!(next.state.inputs.is_empty());
        let completed = next.state.last.unwrap();
        assert_eq!(completed.used_inputs, before);
        assert_eq!(completed.result.duration_months, 60);
    }

    #[test]
    fn success_replaces_previous_result() {
        let state = update(typed(), Event::SubmitStarted { request: 1 }).state;
        let state = update(
            state,
            Event::SubmitSucceeded {
                request: 1,
                result: result(12),
            },
        )
        .state;
        let state = edited(state, Field::StartYear, "2030");
        let state = update(state, Event::SubmitStarted { request: 2 }).state;
        let state = update(
            state,
            Event::SubmitSucceeded {
                request: 2,
                result: result(24),
            },
        )
        .state;

        let last = state.last.unwrap();
        assert_eq!(last.result.duration_months, 24);
        assert_eq!(last.used_inputs.start_year, "2030");
        assert_eq!(last.used_inputs.monthly_investment, "");
    }

    #[test]
    fn failure_keeps_inputs_and_previous_result() {
        let previous = Completed {
            used_inputs: InputSet::empty(),
            result: result(3),
        };
        let state = ViewState {
            last: Some(previous.clone()),
            ..typed()
        };
        let inputs = state.inputs.clone();
        let state = update(state, Event::SubmitStarted { request: 4 }).state;

        let next = update(state, Event::SubmitFailed { request: 4 });

        assert!(next.applied);
        assert_eq!(next.notice, Some(Notice::SimulationFailed));
        assert!(!next.state.is_busy());
        assert_eq!(next.state.inputs, inputs);
        assert_eq!(next.state.last, Some(previous));
    }

    #[test]
    fn stale_success_is_ignored() {
        let state = update(typed(), Event::SubmitStarted { request: 1 }).state;
        let state = update(state, Event::SubmitStarted { request: 2 }).state;

        let next = update(
            state.clone(),
            Event::SubmitSucceeded {
                request: 1,
                result: result(1),
            },
        );

        assert!(!next.applied);
        assert!(next.notice.is_none());
        assert_eq!(next.state, state);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let state = update(typed(), Event::SubmitStarted { request: 1 }).state;
        let state = update(state, Event::SubmitStarted { request: 2 }).state;

        let next = update(state.clone(), Event::SubmitFailed { request: 1 });

        assert!(!next.applied);
        assert_eq!(next.state, state);
    }

    #[test]
    fn cancel_returns_to_idle_silently() {
        let state = typed();
        let inputs = state.inputs.clone();
        let state = update(state, Event::SubmitStarted { request: 3 }).state;

        let next = update(state, Event::SubmitCancelled { request: 3 });

        assert!(next.applied);
        assert!(next.notice.is_none());
        assert!(!next.state.is_busy());
        assert_eq!(next.state.inputs, inputs);
        assert!(next.state.last.is_none());
    }

    #[test]
    fn completion_while_idle_is_ignored() {
        let state = typed();
        let next = update(
            state.clone(),
            Event::SubmitSucceeded {
                request: 7,
                result: result(1),
            },
        );
        assert!(!next.applied);
        assert_eq!(next.state, state);
    }
}
