//! The simulator screen: owns the view state and drives submissions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::artifact::{ArtifactOpener, open_artifact};
use crate::client::Simulator;
use crate::currency::ExchangeRate;
use crate::error::{ArtifactError, SimulateError};
use crate::form::{Field, InputSet};
use crate::notify::{Notice, NoticeBus};
use crate::present;
use crate::spinner::BusyStyle;
use crate::state::{Event, RequestId, Submission, ViewState, update};

/// How a call to [`Screen::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed,
    Failed(SimulateError),
    /// A newer submission or an explicit cancel took over; nothing changed.
    Superseded,
}

/// Cancellation scope of the submission currently in flight.
struct InFlight {
    request: RequestId,
    token: CancellationToken,
}

pub struct Screen {
    simulator: Arc<dyn Simulator>,
    notices: Arc<NoticeBus>,
    rate: ExchangeRate,
    busy_style: BusyStyle,
    state: Mutex<ViewState>,
    /// Lock before `state` when both are needed.
    in_flight: Mutex<Option<InFlight>>,
    next_request: AtomicU64,
}

impl Screen {
    pub fn new(simulator: Arc<dyn Simulator>, notices: Arc<NoticeBus>, rate: ExchangeRate) -> Self {
        Self {
            simulator,
            notices,
            rate,
            busy_style: BusyStyle::Quiet,
            state: Mutex::new(ViewState::default()),
            in_flight: Mutex::new(None),
            next_request: AtomicU64::new(1),
        }
    }

    pub fn with_busy_style(mut self, style: BusyStyle) -> Self {
        self.busy_style = style;
        self
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// A copy of the current state.
    pub fn state(&self) -> ViewState {
        self.state.lock().unwrap().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().unwrap().is_busy()
    }

    /// Apply one event and raise its notice. Returns whether it took effect.
    pub fn dispatch(&self, event: Event) -> bool {
        let transition = {
            let mut state = self.state.lock().unwrap();
            let transition = update(std::mem::take(&mut *state), event);
            *state = transition.state;
            (transition.notice, transition.applied)
        };
        let (notice, applied) = transition;
        if let Some(notice) = notice {
            self.notices.emit(notice);
        }
        applied
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.dispatch(Event::FieldEdited {
            field,
            value: value.into(),
        });
    }

    pub fn reset(&self) {
        self.dispatch(Event::FormReset);
    }

    /// Send the current inputs to the simulator and fold the answer into
    /// the state. Starting a submission cancels any earlier one.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, inputs, token) = self.begin();
        debug!(request, "simulation started");

        let spinner = self.busy_style.start("simulating");
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.simulator.simulate(&inputs) => Some(result),
        };
        if let Some(spinner) = spinner {
            spinner.stop().await;
        }
        self.release(request);

        match outcome {
            None => {
                warn!(request, "simulation superseded before it finished");
                SubmitOutcome::Superseded
            }
            Some(Ok(result)) => {
                if self.dispatch(Event::SubmitSucceeded { request, result }) {
                    info!(request, "simulation complete");
                    SubmitOutcome::Completed
                } else {
                    warn!(request, "dropping stale simulation result");
                    SubmitOutcome::Superseded
                }
            }
            Some(Err(err)) => {
                if self.dispatch(Event::SubmitFailed { request }) {
                    error!(request, error = %err, "simulation failed");
                    SubmitOutcome::Failed(err)
                } else {
                    warn!(request, error = %err, "dropping stale simulation failure");
                    SubmitOutcome::Superseded
                }
            }
        }
    }

    /// Abandon the in-flight submission, if any. Inputs are left as typed.
    pub fn cancel(&self) {
        let mut slot = self.in_flight.lock().unwrap();
        let Some(in_flight) = slot.take() else {
            return;
        };
        in_flight.token.cancel();
        self.dispatch(Event::SubmitCancelled {
            request: in_flight.request,
        });
    }

    /// Open the last result's artifact, raising a notice when that is not
    /// possible.
    pub fn open_artifact(&self, opener: &dyn ArtifactOpener) -> Result<String, ArtifactError> {
        let result = self.state.lock().unwrap().last.as_ref().map(|c| c.result.clone());
        let opened = open_artifact(result.as_ref(), opener);
        if let Err(err) = &opened {
            warn!(error = %err, "cannot open simulation file");
            self.notices.emit(match err {
                ArtifactError::Missing => Notice::ArtifactMissing,
                ArtifactError::Unsupported => Notice::ArtifactUnsupported,
                ArtifactError::Launch { .. } => Notice::ArtifactFailed,
            });
        }
        opened
    }

    pub fn render_home(&self) -> String {
        present::render_home(&self.state(), self.rate)
    }

    pub fn render_result(&self) -> Option<String> {
        present::render_result(self.state().last.as_ref(), self.rate)
    }

    pub fn render_form(&self) -> String {
        present::render_form(&self.state().inputs)
    }

    /// Allocate a request id, swap in a fresh cancellation scope and freeze
    /// the inputs. All of it happens under the `in_flight` lock, so the
    /// slot and the state always name the same request.
    fn begin(&self) -> (RequestId, InputSet, CancellationToken) {
        let mut slot = self.in_flight.lock().unwrap();
        let request = self.next_request.fetch_add(1, Ordering::SeqCst);
        let token = CancellationToken::new();
        let previous = slot.replace(InFlight {
            request,
            token: token.clone(),
        });
        if let Some(previous) = previous {
            debug!(superseded = previous.request, request, "cancelling earlier simulation");
            previous.token.cancel();
        }

        let mut state = self.state.lock().unwrap();
        let started = update(std::mem::take(&mut *state), Event::SubmitStarted { request }).state;
        let inputs = match &started.submission {
            Submission::InFlight { snapshot, .. } => snapshot.clone(),
            Submission::Idle => InputSet::empty(),
        };
        *state = started;
        (request, inputs, token)
    }

    /// Clear the in-flight slot unless a newer submission already owns it.
    fn release(&self, request: RequestId) {
        let mut slot = self.in_flight.lock().unwrap();
        if slot.as_ref().is_some_and(|f| f.request == request) {
            *slot = None;
        }
    }
}
