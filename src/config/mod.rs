//! Settings: a key-value table in SQLite plus the resolved, typed view.
//!
//! Only configuration lives here. Form inputs and results are never
//! written to disk.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::sync::Mutex;

use crate::consts::DEFAULT_API_URL;
use crate::currency::ExchangeRate;

pub const KEY_API_URL: &str = "api_url";
pub const KEY_EXCHANGE_RATE: &str = "exchange_rate";
pub const KEY_TIMEOUT_SECS: &str = "timeout_secs";

/// Keys `bondsim config` accepts.
pub const KNOWN_KEYS: &[&str] = &[KEY_API_URL, KEY_EXCHANGE_RATE, KEY_TIMEOUT_SECS];

/// Persistent key-value settings store.
pub struct SettingsStore {
    conn: Mutex<Connection>,
}

impl SettingsStore {
    /// Open or create the settings table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open settings database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create settings table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a value (upsert). Known keys are validated first.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        validate(key, value)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored pairs, sorted by key.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn validate(key: &str, value: &str) -> Result<()> {
    match key {
        KEY_API_URL => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                bail!("{key} must be an http(s) URL, got {value:?}");
            }
        }
        KEY_EXCHANGE_RATE => {
            value.parse::<ExchangeRate>()?;
        }
        KEY_TIMEOUT_SECS => {
            parse_timeout(value)?;
        }
        _ => bail!("unknown setting: {key} (known: {})", KNOWN_KEYS.join(", ")),
    }
    Ok(())
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("{KEY_TIMEOUT_SECS} must be whole seconds, got {value:?}"))?;
    if secs == 0 {
        bail!("{KEY_TIMEOUT_SECS} must be at least 1");
    }
    Ok(Duration::from_secs(secs))
}

/// Values given on the command line. They win over stored settings.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub exchange_rate: Option<f64>,
    pub timeout_secs: Option<u64>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub exchange_rate: ExchangeRate,
    /// `None` waits for the transport indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            exchange_rate: ExchangeRate::default(),
            timeout: None,
        }
    }
}

impl Settings {
    /// CLI flag, then stored value, then default.
    pub fn resolve(store: Option<&SettingsStore>, overrides: &Overrides) -> Result<Self> {
        let stored = |key: &str| -> Result<Option<String>> {
            match store {
                Some(store) => store.get(key),
                None => Ok(None),
            }
        };

        let api_url = match &overrides.api_url {
            Some(url) => {
                validate(KEY_API_URL, url).context("invalid --api-url")?;
                url.clone()
            }
            None => stored(KEY_API_URL)?.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };

        let exchange_rate = match overrides.exchange_rate {
            Some(rate) => ExchangeRate::new(rate)?,
            None => match stored(KEY_EXCHANGE_RATE)? {
                Some(value) => value
                    .parse()
                    .with_context(|| format!("invalid stored {KEY_EXCHANGE_RATE}"))?,
                None => ExchangeRate::default(),
            },
        };

        let timeout = match overrides.timeout_secs {
            Some(0) => bail!("--timeout must be at least 1 second"),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => match stored(KEY_TIMEOUT_SECS)? {
                Some(value) => Some(
                    parse_timeout(&value)
                        .with_context(|| format!("invalid stored {KEY_TIMEOUT_SECS}"))?,
                ),
                None => None,
            },
        };

        Ok(Self {
            api_url,
            exchange_rate,
            timeout,
        })
    }

    pub fn timeout_label(&self) -> String {
        match self.timeout {
            Some(t) => format!("{}s", t.as_secs()),
            None => "none".to_string(),
        }
    }
}
