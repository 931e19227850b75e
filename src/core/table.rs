use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// A CSV log held in memory. The first line is treated as a header.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let table = Self::from_csv(reader)?;
        debug!("Loaded {} rows from {:?}", table.row_count(), path);
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::ReaderBuilder::new().flexible(true).from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 0-based data row.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// 1-based data row, as used by the folder mapping.
    pub fn row_one_based(&self, row: usize) -> Option<&[String]> {
        row.checked_sub(1).and_then(|i| self.row(i))
    }
}
