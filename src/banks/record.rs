//! Record types for the bank market-capitalization pipeline

use serde::{Deserialize, Serialize};

/// A raw row scraped from the market-capitalization table.
///
/// The market cap is kept as the scraped text; numeric coercion happens
/// later in the [`CurrencyConverter`](crate::banks::CurrencyConverter) so
/// extraction stays a pure structural read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankRow {
    /// Bank name as displayed on the page
    pub name: String,
    /// Market capitalization cell text, USD billions, untrimmed of footnotes
    pub market_cap: String,
}

impl BankRow {
    pub fn new(name: impl Into<String>, market_cap: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            market_cap: market_cap.into(),
        }
    }
}

/// A fully converted bank record, one per scraped row.
///
/// Serde field names match the flat-file header and the database columns.
/// `None` in any numeric field means the scraped market cap did not parse;
/// it serializes to an empty CSV field and a SQL NULL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: Option<f64>,
    #[serde(rename = "MC_GBP_Billion")]
    pub mc_gbp_billion: Option<f64>,
    #[serde(rename = "MC_EUR_Billion")]
    pub mc_eur_billion: Option<f64>,
    #[serde(rename = "MC_INR_Billion")]
    pub mc_inr_billion: Option<f64>,
}

/// Column names of the final schema, in output order
pub const FINAL_COLUMNS: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];
