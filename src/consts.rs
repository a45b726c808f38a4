//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Organisation shown in the layout footer.
pub const ORGANISATION: &str = "Pynecot AI Finance";

/// Path of the simulation route on the backend.
pub const SIMULATE_PATH: &str = "/api/simulate/";

/// Endpoint used when neither the CLI nor the settings store provide one.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/simulate/";

/// Server currency (ZMW) per display currency (USD).
pub const DEFAULT_EXCHANGE_RATE: f64 = 28.0;

/// Server currency code used in the narrative summary.
pub const SERVER_CURRENCY: &str = "ZMW";

/// Default database path: `~/.bondsim/bondsim.db`.
/// Holds the settings table only; inputs and results are never stored.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".bondsim").join("bondsim.db"))
}
