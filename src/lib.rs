//! Bank Market Capitalization ETL
//!
//! A one-shot batch pipeline: scrape the largest-banks table from a web
//! page, convert the USD market caps with a static rate table, persist to
//! CSV and SQLite, and report three fixed queries.

pub mod banks;
pub mod cli;
pub mod client;
pub mod config;
pub mod etl;
pub mod progress;
pub mod report;
pub mod storage;

// Re-exports for convenience
pub use banks::{BankRecord, BankRow, BankTableExtractor, CurrencyConverter, ExchangeRates};
pub use client::PageClient;
pub use config::Config;
pub use etl::{Extractor, Loader, Transformer};
pub use progress::ProgressLog;
pub use report::QueryRunner;
pub use storage::{BanksTableLoader, CsvReader, CsvWriter, SqliteStore};
