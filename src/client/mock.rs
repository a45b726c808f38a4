use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{SimulationResult, Simulator};
use crate::error::SimulateError;
use crate::form::InputSet;

/// A scripted simulator for tests. Returns pre-defined outcomes in order
/// and records the inputs it was called with.
pub struct MockSimulator {
    outcomes: Vec<Result<SimulationResult, SimulateError>>,
    index: AtomicUsize,
    calls: Mutex<Vec<InputSet>>,
}

impl MockSimulator {
    pub fn new(outcomes: Vec<Result<SimulationResult, SimulateError>>) -> Self {
        Self {
            outcomes,
            index: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same result.
    pub fn succeeding(result: SimulationResult) -> Self {
        Self::new(vec![Ok(result)])
    }

    /// Inputs received so far, oldest first.
    pub fn calls(&self) -> Vec<InputSet> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Simulator for MockSimulator {
    async fn simulate(&self, inputs: &InputSet) -> Result<SimulationResult, SimulateError> {
        self.calls.lock().unwrap().push(inputs.clone());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // A single scripted outcome repeats forever.
        let outcome = if self.outcomes.len() == 1 {
            self.outcomes.first()
        } else {
            self.outcomes.get(i)
        };
        outcome.cloned().unwrap_or_else(|| {
            Err(SimulateError::Transport(format!(
                "MockSimulator: no more outcomes (called {} times)",
                i + 1
            )))
        })
    }
}
