//! Read-only query reporting
//!
//! Runs the fixed report queries against the loaded table and renders
//! each result as a text table on stdout.

use eyre::{Context, Result};
use owo_colors::OwoColorize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

/// A materialized query result, ready for display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Runs literal SQL queries against the bank table and reports results.
///
/// The report is three fixed read-only queries, in order:
/// 1. every row of the table
/// 2. the arithmetic mean of the GBP column
/// 3. the names of the first five rows in table order
///
/// # Example
/// ```no_run
/// use bankcap::report::QueryRunner;
/// use bankcap::storage::SqliteStore;
///
/// # async fn example() -> eyre::Result<()> {
/// let store = SqliteStore::open_existing("Banks.db").await?;
/// let runner = QueryRunner::new(store.pool().clone(), "Largest_banks");
/// runner.report().await?;
/// store.close().await;
/// # Ok(())
/// # }
/// ```
pub struct QueryRunner {
    pool: SqlitePool,
    table: String,
}

impl QueryRunner {
    /// Create a runner against `table`
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// The three fixed report queries, in execution order
    pub fn queries(&self) -> [String; 3] {
        [
            format!("SELECT * FROM {}", self.table),
            format!("SELECT AVG(MC_GBP_Billion) FROM {}", self.table),
            format!("SELECT Name FROM {} LIMIT 5", self.table),
        ]
    }

    /// Execute a literal query string and materialize the result
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub async fn run(&self, sql: &str) -> Result<QueryOutput> {
        log::debug!("Running query: {}", sql);

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Query failed: {}", sql))?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect(),
            None => Vec::new(),
        };

        let rows = rows
            .iter()
            .map(|row| {
                (0..row.columns().len())
                    .map(|index| cell_display(row, index))
                    .collect::<Result<Vec<String>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(QueryOutput { columns, rows })
    }

    /// Run all fixed queries and print each result
    ///
    /// # Errors
    /// Returns an error if any query fails
    pub async fn report(&self) -> Result<()> {
        for sql in self.queries() {
            let output = self.run(&sql).await?;

            println!("{}", sql.cyan());
            println!("{}", render(&output));
            println!();
        }

        Ok(())
    }
}

/// Render a query result as a text table
pub fn render(output: &QueryOutput) -> String {
    if output.rows.is_empty() {
        return "(no rows)".to_string();
    }

    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table.set_header(output.columns.clone());
    for row in &output.rows {
        table.add_row(row.clone());
    }

    table.to_string()
}

fn cell_display(row: &SqliteRow, index: usize) -> Result<String> {
    let (is_null, type_name) = {
        let value = row.try_get_raw(index)?;
        (value.is_null(), value.type_info().name().to_string())
    };

    if is_null {
        return Ok("NULL".to_string());
    }

    let text = match type_name.as_str() {
        "INTEGER" => row.try_get::<i64, _>(index)?.to_string(),
        "REAL" => row.try_get::<f64, _>(index)?.to_string(),
        _ => row.try_get::<String, _>(index)?,
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::BankRecord;
    use crate::etl::Loader;
    use crate::storage::{BanksTableLoader, SqliteStore};

    fn record(name: &str, gbp: Option<f64>) -> BankRecord {
        BankRecord {
            name: name.to_string(),
            mc_usd_billion: gbp.map(|v| v / 0.8),
            mc_gbp_billion: gbp,
            mc_eur_billion: None,
            mc_inr_billion: None,
        }
    }

    async fn loaded_store(records: Vec<BankRecord>) -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        BanksTableLoader::new(store.pool().clone(), "Largest_banks")
            .load(records)
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_fixed_queries_target_the_configured_table() {
        let runner = QueryRunner::new(SqlitePool::connect_lazy("sqlite::memory:").unwrap(), "Banks");

        assert_eq!(
            runner.queries(),
            [
                "SELECT * FROM Banks",
                "SELECT AVG(MC_GBP_Billion) FROM Banks",
                "SELECT Name FROM Banks LIMIT 5",
            ]
        );
    }

    #[tokio::test]
    async fn test_mean_of_gbp_column() {
        let store = loaded_store(vec![
            record("Bank A", Some(80.0)),
            record("Bank B", Some(20.0)),
        ])
        .await;
        let runner = QueryRunner::new(store.pool().clone(), "Largest_banks");

        let output = runner
            .run("SELECT AVG(MC_GBP_Billion) FROM Largest_banks")
            .await
            .unwrap();

        assert_eq!(output.columns, vec!["AVG(MC_GBP_Billion)"]);
        assert_eq!(output.rows, vec![vec!["50".to_string()]]);

        store.close().await;
    }

    #[tokio::test]
    async fn test_select_all_renders_nulls() {
        let store = loaded_store(vec![record("Bank C", None)]).await;
        let runner = QueryRunner::new(store.pool().clone(), "Largest_banks");

        let output = runner.run("SELECT * FROM Largest_banks").await.unwrap();

        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.rows[0][0], "Bank C");
        assert_eq!(output.rows[0][2], "NULL");

        store.close().await;
    }

    #[tokio::test]
    async fn test_first_five_names_in_table_order() {
        let records = (1..=7)
            .map(|i| record(&format!("Bank {}", i), Some(i as f64)))
            .collect();
        let store = loaded_store(records).await;
        let runner = QueryRunner::new(store.pool().clone(), "Largest_banks");

        let output = runner
            .run("SELECT Name FROM Largest_banks LIMIT 5")
            .await
            .unwrap();

        let names: Vec<&str> = output.rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(names, vec!["Bank 1", "Bank 2", "Bank 3", "Bank 4", "Bank 5"]);

        store.close().await;
    }

    #[tokio::test]
    async fn test_empty_table_renders_no_rows() {
        let store = loaded_store(Vec::new()).await;
        let runner = QueryRunner::new(store.pool().clone(), "Largest_banks");

        let output = runner.run("SELECT * FROM Largest_banks").await.unwrap();

        assert!(output.rows.is_empty());
        assert_eq!(render(&output), "(no rows)");

        store.close().await;
    }
}
