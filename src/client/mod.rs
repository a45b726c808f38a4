pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::SimulateError;
use crate::form::InputSet;

/// Server-computed summary of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_invested: f64,
    pub total_interest: f64,
    /// Whole months; `60.0` on the wire is accepted as 60.
    #[serde(deserialize_with = "whole_months")]
    pub duration_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_url: Option<String>,
}

impl SimulationResult {
    /// The artifact link, treating an empty string as absent.
    pub fn artifact_url(&self) -> Option<&str> {
        self.excel_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

fn whole_months<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let months = f64::deserialize(deserializer)?;
    if months.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&months) {
        return Err(de::Error::custom(format!(
            "duration_months must be a whole number of months, got {months}"
        )));
    }
    Ok(months as u32)
}

/// Response envelope: `{ "summary": { … } }`.
#[derive(Debug, Deserialize)]
pub struct SimulateResponse {
    pub summary: SimulationResult,
}

/// Something that can run a simulation. The HTTP backend in production,
/// a script in tests.
#[async_trait]
pub trait Simulator: Send + Sync {
    async fn simulate(&self, inputs: &InputSet) -> Result<SimulationResult, SimulateError>;
}
