//! SQLite store operations
//!
//! One database connection serves both the table load and the report
//! queries; the run opens it once and closes it explicitly at the end.

use crate::banks::BankRecord;
use crate::etl::Loader;

use async_trait::async_trait;
use eyre::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

/// Handle to the embedded SQLite database.
///
/// Wraps a single-connection [`SqlitePool`]; the pipeline is sequential so
/// one connection is all it ever needs.
///
/// # Example
/// ```no_run
/// use bankcap::storage::SqliteStore;
///
/// # async fn example() -> eyre::Result<()> {
/// let store = SqliteStore::connect("Banks.db").await?;
/// // ... load and query ...
/// store.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `path`, creating the file if it does not exist
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let store = Self::connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        log::debug!("Opened database {}", path.display());

        Ok(store)
    }

    /// Open an existing database at `path`, failing if the file is missing
    ///
    /// # Errors
    /// Returns an error if the database does not exist or cannot be opened
    pub async fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new().filename(path);

        Self::connect_with(options)
            .await
            .with_context(|| format!("Failed to open existing database: {}", path.display()))
    }

    /// Open an in-memory database
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established
    pub async fn in_memory() -> Result<Self> {
        Self::connect_with(SqliteConnectOptions::new().in_memory(true))
            .await
            .context("Failed to open in-memory database")
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection
    ///
    /// Called at the end of the run on both success and failure paths.
    pub async fn close(&self) {
        self.pool.close().await;
        log::debug!("Database connection closed");
    }
}

/// Loader that writes bank records to a named SQLite table
///
/// Replace-on-write semantics: the target table is dropped and recreated
/// inside one transaction, so a rerun never appends or duplicates. Insert
/// order follows the record sequence.
pub struct BanksTableLoader {
    pool: SqlitePool,
    table: String,
}

impl BanksTableLoader {
    /// Create a loader targeting `table`
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    async fn replace_table(&self, records: &[BankRecord]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin load transaction")?;

        sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{}""#, self.table))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to drop table {}", self.table))?;

        sqlx::query(&format!(
            r#"CREATE TABLE "{}" (
                "Name" TEXT,
                "MC_USD_Billion" REAL,
                "MC_GBP_Billion" REAL,
                "MC_EUR_Billion" REAL,
                "MC_INR_Billion" REAL
            )"#,
            self.table
        ))
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to create table {}", self.table))?;

        let insert = format!(
            r#"INSERT INTO "{}"
                ("Name", "MC_USD_Billion", "MC_GBP_Billion", "MC_EUR_Billion", "MC_INR_Billion")
                VALUES (?, ?, ?, ?, ?)"#,
            self.table
        );

        for record in records {
            sqlx::query(&insert)
                .bind(&record.name)
                .bind(record.mc_usd_billion)
                .bind(record.mc_gbp_billion)
                .bind(record.mc_eur_billion)
                .bind(record.mc_inr_billion)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert record for {}", record.name))?;
        }

        tx.commit()
            .await
            .context("Failed to commit load transaction")?;

        Ok(())
    }
}

#[async_trait]
impl Loader for BanksTableLoader {
    type Item = BankRecord;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.replace_table(&items).await?;

        log::info!(
            "Loaded {} record(s) into table {}",
            items.len(),
            self.table
        );

        Ok(items.len())
    }
}
