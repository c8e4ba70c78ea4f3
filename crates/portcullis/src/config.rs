//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Default location of the access map file.
pub const DEFAULT_ACCESS_MAP: &str = "./config/access_map.yml";

/// Default tracing filter when neither `RUST_LOG` nor `PORTCULLIS_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the access map file (default: ./config/access_map.yml).
    pub access_map: PathBuf,

    /// Tracing filter directive (default: "info").
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_map: PathBuf::from(DEFAULT_ACCESS_MAP),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let access_map = match lookup("PORTCULLIS_ACCESS_MAP") {
            Some(path) if path.trim().is_empty() => {
                bail!("PORTCULLIS_ACCESS_MAP must not be empty")
            }
            Some(path) => PathBuf::from(path),
            None => defaults.access_map,
        };

        let log_filter = lookup("PORTCULLIS_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            access_map,
            log_filter,
        })
    }
}
