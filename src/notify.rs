//! User-visible notifications.
//!
//! The screen raises [`Notice`]s via [`NoticeBus::emit`]; the REPL (or a
//! test) subscribes via [`NoticeBus::subscribe`]. Built on
//! [`tokio::sync::broadcast`] so several listeners can react independently.

use std::fmt;

use tokio::sync::broadcast;

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SimulationComplete,
    SimulationFailed,
    /// The artifact exists but this target cannot open it.
    ArtifactUnsupported,
    /// The artifact action was used without a file to open.
    ArtifactMissing,
    /// The system handler refused to open the file.
    ArtifactFailed,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::SimulationComplete => "✅ Success",
            Notice::SimulationFailed => "❌ Error",
            Notice::ArtifactUnsupported => "Not supported",
            Notice::ArtifactMissing | Notice::ArtifactFailed => "Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::SimulationComplete => "Simulation complete.",
            Notice::SimulationFailed => "Failed to simulate. Try again.",
            Notice::ArtifactUnsupported => "Opening files is not supported on this target.",
            Notice::ArtifactMissing => "No Excel file available.",
            Notice::ArtifactFailed => "Could not open the simulation file.",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::SimulationComplete)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// A broadcast channel any component can emit notices to.
#[derive(Debug)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit a notice to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, notice: Notice) -> usize {
        self.tx.send(notice).unwrap_or(0)
    }

    /// Subscribe to future notices (past ones are not replayed).
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Drain everything currently queued on a receiver without waiting.
pub fn drain(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(notice) => notices.push(notice),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    notices
}
