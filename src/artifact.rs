//! Opening the generated simulation file.
//!
//! Whether a target can open files at all is decided once, at startup, by
//! picking an [`ArtifactOpener`].

use std::sync::Mutex;

use crate::client::SimulationResult;
use crate::error::ArtifactError;

/// Capability to hand a URL to something that can display it.
pub trait ArtifactOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ArtifactError>;
}

/// Opens URLs with the system handler (browser).
pub struct SystemOpener;

impl ArtifactOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), ArtifactError> {
        open::that(url).map_err(|e| ArtifactError::Launch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// For targets that cannot open files.
pub struct UnsupportedOpener;

impl ArtifactOpener for UnsupportedOpener {
    fn open(&self, _url: &str) -> Result<(), ArtifactError> {
        Err(ArtifactError::Unsupported)
    }
}

/// Remembers what it was asked to open. For tests.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl ArtifactOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), ArtifactError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Open the artifact of `result`, if it has one.
pub fn open_artifact(
    result: Option<&SimulationResult>,
    opener: &dyn ArtifactOpener,
) -> Result<String, ArtifactError> {
    let url = result
        .and_then(SimulationResult::artifact_url)
        .ok_or(ArtifactError::Missing)?;
    opener.open(url)?;
    Ok(url.to_string())
}
