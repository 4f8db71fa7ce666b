//! CSV export — serializes assembled rows into the flat output artifact.
//!
//! The artifact is written once at the end of a run. A filesystem failure
//! here is the only error that is fatal to a whole run; everything upstream
//! degrades per identifier instead.

use crate::row::{OutputRow, COLUMNS};
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

/// Serialize rows to CSV with the fixed column contract as header.
pub fn export_csv(rows: &[OutputRow]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }

    let data = wtr.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(data).map_err(|_| ExportError::Utf8)
}

/// Write the artifact as `fundamentals_{timestamp}.csv` under `output_dir`,
/// creating the directory if needed. Returns the path written.
pub fn save_artifact(rows: &[OutputRow], output_dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir)?;

    let filename = format!("fundamentals_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let path = output_dir.join(filename);

    let csv = export_csv(rows)?;
    std::fs::write(&path, csv)?;

    Ok(path)
}
