use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::{SimulateResponse, SimulationResult, Simulator};
use crate::error::SimulateError;
use crate::form::InputSet;

/// Posts the form to the simulation backend.
pub struct HttpSimulator {
    client: reqwest::Client,
    url: String,
}

impl HttpSimulator {
    /// `timeout` of `None` waits for as long as the transport does.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_response(body: &str) -> Result<SimulationResult, SimulateError> {
        serde_json::from_str::<SimulateResponse>(body)
            .map(|resp| resp.summary)
            .map_err(|e| SimulateError::Payload(e.to_string()))
    }
}

#[async_trait]
impl Simulator for HttpSimulator {
    async fn simulate(&self, inputs: &InputSet) -> Result<SimulationResult, SimulateError> {
        debug!(url = %self.url, ?inputs, "posting simulation request");

        let resp = self
            .client
            .post(&self.url)
            .json(inputs)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(SimulateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(%status, bytes = body.len(), "simulation response received");
        Self::parse_response(&body)
    }
}
