//! JSON result writer.

use crate::error::{Error, Result};
use crate::output::{ImageRecord, ResultWriter};
use std::path::Path;

/// Writes one pretty-printed JSON record per image.
#[derive(Debug, Clone, Copy)]
pub struct JsonWriter;

impl ResultWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        crate::constants::output_extensions::JSON
    }

    fn write(&self, record: &ImageRecord, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(record).map_err(|e| Error::ResultsWrite {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        std::fs::write(path, contents).map_err(|e| Error::ResultsWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}
