//! CSV flat-file operations

use crate::banks::BankRecord;
use crate::etl::{Extractor, Loader};

use async_trait::async_trait;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Read bank records from a CSV file
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all records, in file order
    pub fn read(&self) -> Result<Vec<BankRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        reader
            .deserialize()
            .map(|result| {
                result.with_context(|| {
                    format!("Failed to parse CSV record in {}", self.path.display())
                })
            })
            .collect()
    }
}

impl Extractor for CsvReader {
    type Item = BankRecord;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Write bank records to a CSV file
///
/// The header row comes from the record's serde field names. Null market
/// caps serialize to empty fields. Writes replace the file wholesale.
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write records with a header row, in sequence order
    pub fn write(&self, records: &[BankRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        for record in records {
            writer.serialize(record)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write CSV file: {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl Loader for CsvWriter {
    type Item = BankRecord;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write(&items)?;

        log::info!(
            "Saved {} record(s) to {}",
            items.len(),
            self.path.display()
        );

        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::FINAL_COLUMNS;
    use tempfile::TempDir;

    fn sample_records() -> Vec<BankRecord> {
        vec![
            BankRecord {
                name: "Bank A".to_string(),
                mc_usd_billion: Some(100.0),
                mc_gbp_billion: Some(80.0),
                mc_eur_billion: Some(93.0),
                mc_inr_billion: Some(8250.0),
            },
            BankRecord {
                name: "Bank B".to_string(),
                mc_usd_billion: None,
                mc_gbp_billion: None,
                mc_eur_billion: None,
                mc_inr_billion: None,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("banks.csv");
        let records = sample_records();

        CsvWriter::new(&path).write(&records).unwrap();
        let read_back = CsvReader::new(&path).read().unwrap();

        assert_eq!(records, read_back);
    }

    #[test]
    fn test_header_matches_final_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("banks.csv");

        CsvWriter::new(&path).write(&sample_records()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, FINAL_COLUMNS.join(","));
    }

    #[test]
    fn test_null_market_caps_are_empty_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("banks.csv");

        CsvWriter::new(&path).write(&sample_records()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().any(|line| line == "Bank B,,,,"));
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("banks.csv");
        let writer = CsvWriter::new(&path);

        writer.write(&sample_records()).unwrap();
        let second = vec![sample_records().remove(0)];
        writer.write(&second).unwrap();

        let read_back = CsvReader::new(&path).read().unwrap();
        assert_eq!(read_back, second);
    }
}
