//! CLI helper functions

use crate::{
    banks::{BankRecord, BankTableExtractor, CurrencyConverter, ExchangeRates},
    client::PageClient,
    config::Config,
    etl::{Extractor, Loader, Transformer},
    progress::ProgressLog,
    report::QueryRunner,
    storage::{BanksTableLoader, CsvWriter, SqliteStore},
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;

/// Run the full ETL pipeline and the report queries
///
/// Pipeline: BankTableExtractor → CurrencyConverter → CsvWriter + BanksTableLoader → QueryRunner
///
/// Milestones are appended to the run log between stages. The database
/// connection is opened once, shared by the load and the queries, and
/// closed at the end whether or not a later stage failed.
pub async fn run_pipeline(config: &Config) -> Result<()> {
    let progress = ProgressLog::new(&config.log_path);
    progress.record("Preliminaries complete. Initiating ETL process")?;

    log::info!("Extracting from {}", config.url.as_str().bright_black());
    let client = PageClient::try_new()?;
    let extractor = BankTableExtractor::new(client, config.url.clone());
    let rows = extractor.extract().await?;
    progress.record("Data extraction complete. Initiating transformation process")?;

    let rates = ExchangeRates::from_csv(&config.rates_path)?;
    let converter = CurrencyConverter::new(rates);
    let records = converter.transform_many(rows)?;
    log::info!("✓ Transformed {} record(s)", records.len());
    progress.record("Data transformation complete. Initiating loading process")?;

    let writer = CsvWriter::new(&config.csv_path);
    let count = writer.load(records.clone()).await?;
    log::info!(
        "✓ Saved {} record(s) to {}",
        count,
        config.csv_path.display().bright_black()
    );
    progress.record("Data saved to CSV file")?;

    let store = SqliteStore::connect(&config.db_path).await?;
    progress.record("SQL connection initiated")?;

    let outcome = load_and_report(&store, config, records, &progress).await;
    store.close().await;
    outcome?;

    progress.record("Process complete")?;
    log::info!("✓ Pipeline complete");

    Ok(())
}

/// Load records into the database table, then run the report queries
///
/// Split out from [`run_pipeline`] so the store can be closed on both the
/// success and failure paths.
async fn load_and_report(
    store: &SqliteStore,
    config: &Config,
    records: Vec<BankRecord>,
    progress: &ProgressLog,
) -> Result<()> {
    let loader = BanksTableLoader::new(store.pool().clone(), &config.table_name);
    let count = loader.load(records).await?;
    log::info!(
        "✓ Loaded {} record(s) into {}",
        count,
        config.table_name.bright_black()
    );
    progress.record("Data loaded to database as a table, executing queries")?;

    let runner = QueryRunner::new(store.pool().clone(), &config.table_name);
    runner.report().await?;

    Ok(())
}

/// Run the report queries against an existing database
///
/// Pipeline: SqliteStore → QueryRunner
pub async fn report_queries(config: &Config) -> Result<()> {
    let store = SqliteStore::open_existing(&config.db_path).await?;

    let runner = QueryRunner::new(store.pool().clone(), &config.table_name);
    let outcome = runner.report().await;
    store.close().await;
    outcome?;

    Ok(())
}

/// Parse the configured rate table and display it
///
/// An input sanity check: confirms the rate table is readable and carries
/// all three expected codes before a full run.
pub fn show_rates(config: &Config) -> Result<()> {
    let rates = ExchangeRates::from_csv(&config.rates_path).context("Rate table check failed")?;

    println!("Rates from {}:", config.rates_path.display().bright_black());
    println!("  GBP: {}", rates.gbp.cyan());
    println!("  EUR: {}", rates.eur.cyan());
    println!("  INR: {}", rates.inr.cyan());

    Ok(())
}
