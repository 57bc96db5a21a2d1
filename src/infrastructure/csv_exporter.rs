//! CSV export of the final record sequence
//!
//! The header row is always written, even for an empty run. Rows go to a
//! temporary file next to the target which then replaces it, so a failed
//! export never leaves a truncated CSV behind.

#![allow(clippy::uninlined_format_args)]

use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::game::GameRecord;
use crate::domain::services::GameExporter;
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// Write records as CSV (header + one row per record) into any writer
pub fn write_csv<W: io::Write>(writer: W, records: &[GameRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(GameRecord::COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Exports to a single CSV file, overwriting it
#[derive(Debug, Clone)]
pub struct CsvFileExporter {
    path: PathBuf,
}

impl CsvFileExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl GameExporter for CsvFileExporter {
    fn export(&self, records: &[GameRecord]) -> ScrapeResult<String> {
        let location = self.path.display().to_string();

        let mut staged = NamedTempFile::new_in(self.target_dir())
            .map_err(|e| ScrapeError::export(&location, e.to_string()))?;
        write_csv(staged.as_file_mut(), records)
            .map_err(|e| ScrapeError::export(&location, e.to_string()))?;
        // temp files start out owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| ScrapeError::export(&location, e.to_string()))?;
        }
        staged
            .persist(&self.path)
            .map_err(|e| ScrapeError::export(&location, e.error.to_string()))?;

        info!("💾 Wrote {} records to {}", records.len(), location);
        Ok(location)
    }
}
