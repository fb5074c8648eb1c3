//! Bank market-capitalization domain
//!
//! This module holds the domain types and pipeline stages:
//! - Raw and converted record types
//! - HTML table extraction
//! - Exchange-rate table loading
//! - Currency conversion

mod extractor;
mod rates;
mod record;
mod transformer;

pub use extractor::{BankTableExtractor, parse_market_table};
pub use rates::ExchangeRates;
pub use record::{BankRecord, BankRow, FINAL_COLUMNS};
pub use transformer::CurrencyConverter;
