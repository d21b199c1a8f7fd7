//! CSV persistence for the cleaned table.

use super::MovieRecord;
use crate::error::{MarqueeError, Result};
use std::path::Path;
use tracing::{info, instrument};

/// Column order of the persisted table.
pub const COLUMNS: [&str; 8] = [
    "title",
    "rating",
    "vote_count",
    "meta_score",
    "year",
    "duration",
    "age_restriction",
    "intro",
];

/// Write the full table to `path`.
///
/// Rows go to a temporary file next to `path` which is renamed into place
/// only after every row has been written, so a failure leaves no file behind.
#[instrument(skip(records), fields(path = %path.display(), rows = records.len()))]
pub fn write_csv(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file());
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path)
        .map_err(|e| MarqueeError::Dataset(format!("Failed to write {}: {}", path.display(), e.error)))?;

    info!("Wrote {} movies to {}", records.len(), path.display());
    Ok(())
}

/// Read the table back. A missing or unreadable file is an error.
#[instrument(fields(path = %path.display()))]
pub fn read_csv(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| MarqueeError::Dataset(format!("Failed to open {}: {}", path.display(), e)))?;

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<MovieRecord>, csv::Error>>()?;

    Ok(records)
}
