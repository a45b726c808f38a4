//! Busy indicator shown while a simulation is in flight.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

/// A terminal spinner running in a background task, drawn on stderr.
/// Dropping it without [`Spinner::stop`] still halts the task.
pub struct Spinner {
    handle: JoinHandle<()>,
    stop: DropGuard,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let stop = CancellationToken::new();
        let token = stop.clone();
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            for frame in FRAMES.iter().cycle() {
                // \x1b[2K clears the line, \r returns to its start
                eprint!("\x1b[2K\r{frame} {message}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = token.cancelled() => break,
                }
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            stop: stop.drop_guard(),
        }
    }

    /// Stop the spinner and wait until its line is cleared.
    pub async fn stop(self) {
        let Self { handle, stop } = self;
        drop(stop);
        let _ = handle.await;
    }
}

/// Whether to draw a spinner; the REPL does, tests and one-shot pipes don't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyStyle {
    #[default]
    Spinner,
    Quiet,
}

impl BusyStyle {
    pub fn start(self, message: &str) -> Option<Spinner> {
        match self {
            BusyStyle::Spinner => Some(Spinner::start(message)),
            BusyStyle::Quiet => None,
        }
    }
}
