//! Currency conversion transformer
//!
//! Coerces scraped market-cap text to numbers and derives the GBP, EUR,
//! and INR columns from the USD value.

use crate::banks::{BankRecord, BankRow, ExchangeRates};
use crate::etl::Transformer;

use eyre::Result;

/// Transformer that converts raw bank rows into final records
///
/// Coercion failures are silent and row-local: a market cap that does not
/// parse as a number yields `None` in the USD column and `None` in every
/// derived column, and the row is kept. Derived values are rounded to two
/// decimal places.
///
/// # Example
/// ```
/// use bankcap::banks::{BankRow, CurrencyConverter, ExchangeRates};
/// use bankcap::etl::Transformer;
///
/// let rates = ExchangeRates::new(0.8, 0.93, 82.5).unwrap();
/// let converter = CurrencyConverter::new(rates);
///
/// let record = converter
///     .transform(BankRow::new("Bank A", "100.0"))
///     .unwrap();
/// assert_eq!(record.mc_gbp_billion, Some(80.0));
/// assert_eq!(record.mc_inr_billion, Some(8250.0));
/// ```
pub struct CurrencyConverter {
    rates: ExchangeRates,
}

impl CurrencyConverter {
    /// Create a converter using the given rate table
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }
}

impl Transformer for CurrencyConverter {
    type Input = BankRow;
    type Output = BankRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let usd = coerce_market_cap(&input.market_cap);

        if usd.is_none() {
            log::debug!(
                "Market cap {:?} for {:?} is not numeric, keeping row with nulls",
                input.market_cap,
                input.name
            );
        }

        Ok(BankRecord {
            name: input.name,
            mc_usd_billion: usd,
            mc_gbp_billion: usd.map(|value| round2(value * self.rates.gbp)),
            mc_eur_billion: usd.map(|value| round2(value * self.rates.eur)),
            mc_inr_billion: usd.map(|value| round2(value * self.rates.inr)),
        })
    }
}

/// Coerce scraped market-cap text to a number, `None` on failure
fn coerce_market_cap(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
