//! CSV result writer.

use crate::error::{Error, Result};
use crate::output::{ImageRecord, ResultWriter};
use std::path::Path;

/// Writes a single-row CSV file with a header.
#[derive(Debug, Clone, Copy)]
pub struct CsvWriter;

impl ResultWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        crate::constants::output_extensions::CSV
    }

    fn write(&self, record: &ImageRecord, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| Error::ResultsWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        writer
            .write_record([
                "file",
                "label",
                "confidence",
                "fire_label",
                "fire_confidence",
                "boxes",
                "timestamp",
            ])
            .and_then(|()| {
                writer.write_record([
                    record.file.to_string_lossy().as_ref(),
                    &record.label,
                    &format!("{:.4}", record.confidence),
                    &record.fire_label,
                    &format!("{:.4}", record.fire_confidence),
                    &record.boxes.to_string(),
                    &record.timestamp.to_rfc3339(),
                ])
            })
            .and_then(|()| writer.flush().map_err(csv::Error::from))
            .map_err(|e| Error::ResultsWrite {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }
}
