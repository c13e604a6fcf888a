//! Choice log persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

use crate::choices::entry::ChoiceEntry;

/// Column order of the choice log file.
pub const HEADER: [&str; 4] = [
    "Customer_ID",
    "Segment",
    "Selected_Option",
    "Pred_Repurchase_Count",
];

/// Errors from reading or writing the choice log.
#[derive(Debug, Error)]
pub enum ChoiceLogError {
    /// The log file has not been created yet.
    #[error("Choice log not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Choice log I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Choice log CSV error at {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// File-backed log of each customer's latest choice.
#[derive(Debug)]
pub struct ChoiceLog {
    path: PathBuf,
    /// Held for the whole read-modify-write in `replace`.
    write_lock: Mutex<()>,
}

impl ChoiceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the log with only its header row if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<(), ChoiceLogError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        self.write_all(&[])?;
        tracing::info!(path = %self.path.display(), "Created empty choice log");
        Ok(())
    }

    /// All entries in file order.
    pub fn read_all(&self) -> Result<Vec<ChoiceEntry>, ChoiceLogError> {
        if !self.path.exists() {
            return Err(ChoiceLogError::Missing(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_error(e))?;
        reader
            .deserialize()
            .collect::<Result<Vec<ChoiceEntry>, _>>()
            .map_err(|e| self.csv_error(e))
    }

    /// Rewrite the whole log from `entries`.
    ///
    /// Content goes to a sibling temp file which is then renamed over the
    /// log, so concurrent readers see either the old or the new file.
    pub fn write_all(&self, entries: &[ChoiceEntry]) -> Result<(), ChoiceLogError> {
        let tmp_path = self.tmp_path();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .map_err(|e| self.csv_error(e))?;

        writer.write_record(HEADER).map_err(|e| self.csv_error(e))?;
        for entry in entries {
            writer.serialize(entry).map_err(|e| self.csv_error(e))?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;
        Ok(())
    }

    /// Make `entry` the only entry for its customer, appending it at the end.
    ///
    /// Creates the log if needed. Concurrent calls on the same `ChoiceLog`
    /// are serialized, so no submission is lost.
    pub fn replace(&self, entry: ChoiceEntry) -> Result<(), ChoiceLogError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.ensure_exists()?;
        let mut entries = self.read_all()?;
        let before = entries.len();
        entries.retain(|e| e.customer_id != entry.customer_id);

        tracing::debug!(
            customer_id = entry.customer_id,
            replaced = before - entries.len(),
            "Replacing choice log entry"
        );

        entries.push(entry);
        self.write_all(&entries)
    }

    /// Last entry for `customer_id` in file order.
    ///
    /// Returns `Err(Missing)` when the log file does not exist and
    /// `Ok(None)` when it exists but has no row for the customer.
    pub fn latest(&self, customer_id: i64) -> Result<Option<ChoiceEntry>, ChoiceLogError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.customer_id == customer_id)
            .last())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "choice_log.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> ChoiceLogError {
        ChoiceLogError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> ChoiceLogError {
        ChoiceLogError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
