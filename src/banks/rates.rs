//! Exchange-rate table loading
//!
//! The rate table is a two-column CSV (`Currency,Rate`) supplying the
//! USD multipliers for the three derived columns.

use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Static exchange rates for one pipeline run.
///
/// Loaded once and immutable for the run's duration. Exactly the GBP, EUR,
/// and INR codes are consumed from the rate file; other rows are ignored.
/// A missing code or a non-positive rate is fatal.
///
/// # Example
/// ```
/// use bankcap::banks::ExchangeRates;
///
/// let rates = ExchangeRates::new(0.8, 0.93, 82.95).unwrap();
/// assert_eq!(rates.gbp, 0.8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExchangeRates {
    /// USD → GBP multiplier
    pub gbp: f64,
    /// USD → EUR multiplier
    pub eur: f64,
    /// USD → INR multiplier
    pub inr: f64,
}

impl ExchangeRates {
    /// Create a rate table from the three multipliers
    ///
    /// # Errors
    /// Returns an error if any rate is not a positive number
    pub fn new(gbp: f64, eur: f64, inr: f64) -> Result<Self> {
        for (code, rate) in [("GBP", gbp), ("EUR", eur), ("INR", inr)] {
            if !(rate > 0.0) {
                eyre::bail!("Exchange rate for {} must be positive, got {}", code, rate);
            }
        }

        Ok(Self { gbp, eur, inr })
    }

    /// Load the rate table from a `Currency,Rate` CSV file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, if one of the
    /// GBP/EUR/INR codes is missing, or if a rate is not positive
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open rate table: {}", path.display()))?;

        let mut rates: HashMap<String, f64> = HashMap::new();
        for result in reader.deserialize() {
            let row: RateRow = result
                .with_context(|| format!("Failed to parse rate table: {}", path.display()))?;
            rates.insert(row.currency, row.rate);
        }

        let lookup = |code: &str| {
            rates.get(code).copied().ok_or_else(|| {
                eyre!("Rate table {} is missing the {} rate", path.display(), code)
            })
        };

        let loaded = Self::new(lookup("GBP")?, lookup("EUR")?, lookup("INR")?)?;

        log::debug!("Loaded exchange rates from {}: {:?}", path.display(), loaded);

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rate_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_loads_three_rates() {
        let file = rate_file("Currency,Rate\nGBP,0.8\nEUR,0.93\nINR,82.95\n");

        let rates = ExchangeRates::from_csv(file.path()).unwrap();

        assert_eq!(rates, ExchangeRates::new(0.8, 0.93, 82.95).unwrap());
    }

    #[test]
    fn test_extra_currencies_are_ignored() {
        let file = rate_file("Currency,Rate\nGBP,0.8\nEUR,0.93\nINR,82.95\nJPY,147.5\n");

        let rates = ExchangeRates::from_csv(file.path()).unwrap();

        assert_eq!(rates.inr, 82.95);
    }

    #[test]
    fn test_missing_code_is_an_error() {
        let file = rate_file("Currency,Rate\nGBP,0.8\nEUR,0.93\n");

        let error = ExchangeRates::from_csv(file.path()).unwrap_err();

        assert!(error.to_string().contains("missing the INR rate"));
    }

    #[test]
    fn test_non_positive_rate_is_an_error() {
        let file = rate_file("Currency,Rate\nGBP,0.8\nEUR,-0.93\nINR,82.95\n");

        let error = ExchangeRates::from_csv(file.path()).unwrap_err();

        assert!(error.to_string().contains("must be positive"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ExchangeRates::from_csv("does/not/exist.csv").is_err());
    }
}
