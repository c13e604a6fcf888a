//! Customer dataset loading from disk.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dataset::record::CustomerRecord;

/// Canonical identifier column.
pub const ID_COLUMN: &str = "Customer_ID";
/// Accepted alternative spelling of the identifier column.
pub const ID_COLUMN_ALIAS: &str = "Customer ID";
pub const SEGMENT_COLUMN: &str = "Segment";
pub const PRED_COLUMN: &str = "Pred_Repurchase_Count";

/// Errors that prevent the dataset from loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Missing file: {}", .0.display())]
    Missing(PathBuf),

    #[error("{} must contain column 'Customer_ID' (or 'Customer ID')", .0.display())]
    MissingIdColumn(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Read-only index of customers keyed by identifier.
#[derive(Debug, Default)]
pub struct CustomerIndex {
    records: HashMap<i64, CustomerRecord>,
}

impl CustomerIndex {
    /// Build an index from records. When ids repeat, the first record wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CustomerRecord>,
    {
        let mut index = Self::default();
        for record in records {
            index.insert_first(record);
        }
        index
    }

    /// Look up a customer by identifier.
    pub fn get(&self, id: i64) -> Option<&CustomerRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns false if the id was already present.
    fn insert_first(&mut self, record: CustomerRecord) -> bool {
        match self.records.entry(record.id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }
}

/// Load the customer dataset into an index.
pub fn load(path: &Path) -> Result<CustomerIndex, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::Missing(path.to_path_buf()));
    }

    let csv_error = |source: csv::Error| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let id_col = column(ID_COLUMN)
        .or_else(|| column(ID_COLUMN_ALIAS))
        .ok_or_else(|| DatasetError::MissingIdColumn(path.to_path_buf()))?;
    let segment_col = column(SEGMENT_COLUMN);
    let pred_col = column(PRED_COLUMN);

    let mut index = CustomerIndex::default();
    let mut dropped = 0usize;
    let mut duplicates = 0usize;

    for row in reader.records() {
        let row = row.map_err(csv_error)?;

        let Some(id) = row.get(id_col).and_then(parse_id) else {
            dropped += 1;
            continue;
        };

        let segment = segment_col.and_then(|i| row.get(i));
        let pred = pred_col.and_then(|i| row.get(i)).and_then(parse_count);

        if !index.insert_first(CustomerRecord::new(id, segment, pred)) {
            tracing::warn!(customer_id = id, "Duplicate customer id in dataset, keeping first row");
            duplicates += 1;
        }
    }

    tracing::info!(
        path = %path.display(),
        customers = index.len(),
        dropped_rows = dropped,
        duplicate_rows = duplicates,
        "Customer dataset loaded"
    );

    Ok(index)
}

/// Parse an identifier cell. Accepts integers and integral floats ("42.0").
fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn parse_count(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
