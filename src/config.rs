//! Run configuration
//!
//! Every input and output location is explicit configuration rather than a
//! module constant, so components can be pointed at test fixtures.

use eyre::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Archived copy of the market-capitalization page, stable across runs
pub const DEFAULT_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

const DEFAULT_RATES_PATH: &str = "exchange_rate.csv";
const DEFAULT_CSV_PATH: &str = "Largest_banks_data.csv";
const DEFAULT_DB_PATH: &str = "Banks.db";
const DEFAULT_TABLE_NAME: &str = "Largest_banks";
const DEFAULT_LOG_PATH: &str = "code_log.txt";

/// Configuration for one pipeline run.
///
/// Defaults may be overridden with environment variables (typically sourced
/// from a dotenv file):
/// - `BANKCAP_URL`: page to scrape
/// - `BANKCAP_RATES`: exchange-rate CSV path
/// - `BANKCAP_CSV`: output flat-file path
/// - `BANKCAP_DB`: SQLite database path
/// - `BANKCAP_TABLE`: database table name
/// - `BANKCAP_LOG`: milestone run-log path
#[derive(Clone, Debug)]
pub struct Config {
    /// Page holding the market-capitalization table
    pub url: Url,
    /// Exchange-rate table, `Currency,Rate` CSV
    pub rates_path: PathBuf,
    /// Flat-file output
    pub csv_path: PathBuf,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Table to (re)create in the database
    pub table_name: String,
    /// Milestone run log
    pub log_path: PathBuf,
}

impl Config {
    /// Build a configuration from environment variables, with defaults
    ///
    /// # Errors
    /// Returns an error if `BANKCAP_URL` is set to an unparseable URL
    pub fn from_env() -> Result<Self> {
        let url_str = env_or("BANKCAP_URL", DEFAULT_URL);
        let url = Url::parse(&url_str).with_context(|| format!("Invalid BANKCAP_URL: {}", url_str))?;

        Ok(Self {
            url,
            rates_path: env_or("BANKCAP_RATES", DEFAULT_RATES_PATH).into(),
            csv_path: env_or("BANKCAP_CSV", DEFAULT_CSV_PATH).into(),
            db_path: env_or("BANKCAP_DB", DEFAULT_DB_PATH).into(),
            table_name: env_or("BANKCAP_TABLE", DEFAULT_TABLE_NAME),
            log_path: env_or("BANKCAP_LOG", DEFAULT_LOG_PATH).into(),
        })
    }

    /// Replace the page URL (CLI `--url` override)
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
