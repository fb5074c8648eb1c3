//! Market table extractor
//!
//! Extracts bank name and market-cap cells from the first table body of
//! the configured page.

use crate::banks::BankRow;
use crate::client::PageClient;
use crate::etl::Extractor;

use eyre::{Context, Result, eyre};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extractor for the bank market-capitalization table
///
/// Fetches the page and reads the first `<tbody>` in the document.
/// The page layout this relies on: each data row carries the bank name in
/// its second `<td>` and the market cap (USD billions) in its third.
/// Rows without any `<td>` cells (header rows) are skipped.
///
/// # Example
/// ```no_run
/// use bankcap::banks::BankTableExtractor;
/// use bankcap::client::PageClient;
/// use bankcap::etl::Extractor;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let client = PageClient::try_new()?;
/// let url = Url::parse("https://en.wikipedia.org/wiki/List_of_largest_banks")?;
/// let extractor = BankTableExtractor::new(client, url);
/// let rows = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct BankTableExtractor {
    client: PageClient,
    url: Url,
}

impl BankTableExtractor {
    /// Create a new extractor for the table at `url`
    pub fn new(client: PageClient, url: Url) -> Self {
        Self { client, url }
    }
}

impl Extractor for BankTableExtractor {
    type Item = BankRow;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let html = self.client.fetch_text(&self.url).await?;

        let rows = parse_market_table(&html)
            .with_context(|| format!("Failed to parse market table from {}", self.url))?;

        log::info!("Extracted {} bank row(s)", rows.len());

        Ok(rows)
    }
}

/// Parse the bank table out of a raw HTML document.
///
/// Reads the first `<tbody>` in document order. For every `<tr>` with at
/// least one `<td>`, takes the second `<td>` as the bank name and the third
/// as the market cap, with surrounding whitespace stripped. Rows are
/// returned in document order; no numeric parsing happens here.
///
/// # Errors
/// Returns an error if the document has no `<tbody>`, or if a data row has
/// fewer than three cells.
pub fn parse_market_table(html: &str) -> Result<Vec<BankRow>> {
    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let document = Html::parse_document(html);

    let table = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| eyre!("No table body found in document"))?;

    let mut rows = Vec::new();

    for (index, row) in table.select(&row_selector).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

        // Header and separator rows have no data cells
        if cells.is_empty() {
            continue;
        }

        if cells.len() < 3 {
            eyre::bail!(
                "Table row {} has {} data cell(s), expected at least 3",
                index,
                cells.len()
            );
        }

        let name = cell_text(&cells[1]);
        let market_cap = cell_text(&cells[2]);

        rows.push(BankRow::new(name, market_cap));
    }

    Ok(rows)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| eyre!("Invalid selector {:?}: {}", css, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table>
        <tbody>
        <tr><th>Rank</th><th>Bank name</th><th>Market cap (US$ billion)</th></tr>
        <tr><td>1</td><td> JPMorgan Chase </td><td>432.92
        </td></tr>
        <tr><td>2</td><td>Bank of America</td><td>231.52</td></tr>
        <tr><td>3</td><td>ICBC</td><td>N/A</td></tr>
        </tbody>
        </table>
        <table>
        <tbody>
        <tr><td>9</td><td>Other Bank</td><td>1.00</td></tr>
        </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parses_data_rows_in_order() {
        let rows = parse_market_table(PAGE).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], BankRow::new("JPMorgan Chase", "432.92"));
        assert_eq!(rows[1], BankRow::new("Bank of America", "231.52"));
        assert_eq!(rows[2], BankRow::new("ICBC", "N/A"));
    }

    #[test]
    fn test_skips_header_rows() {
        let rows = parse_market_table(PAGE).unwrap();

        assert!(rows.iter().all(|row| row.name != "Bank name"));
    }

    #[test]
    fn test_only_first_tbody_is_read() {
        let rows = parse_market_table(PAGE).unwrap();

        assert!(rows.iter().all(|row| row.name != "Other Bank"));
    }

    #[test]
    fn test_no_tbody_is_an_error() {
        let error = parse_market_table("<html><body><p>empty</p></body></html>").unwrap_err();

        assert!(error.to_string().contains("No table body"));
    }

    #[test]
    fn test_short_data_row_is_an_error() {
        let html = "<table><tbody><tr><td>1</td><td>Lonely Bank</td></tr></tbody></table>";
        let error = parse_market_table(html).unwrap_err();

        assert!(error.to_string().contains("expected at least 3"));
    }

    #[test]
    fn test_footnote_markup_is_kept_as_text() {
        let html = concat!(
            "<table><tbody>",
            "<tr><td>1</td><td>Annotated Bank</td><td>100.0<sup>[a]</sup></td></tr>",
            "</tbody></table>"
        );
        let rows = parse_market_table(html).unwrap();

        // Coercion decides later whether this is numeric; extraction keeps the text
        assert_eq!(rows[0].market_cap, "100.0[a]");
    }
}
