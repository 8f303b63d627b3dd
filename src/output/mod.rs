//! Result records and output writers.

mod csv;
mod json;

pub use csv::CsvWriter;
pub use json::JsonWriter;

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One analyzed image: classification plus the placeholder detections.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    /// Path of the analyzed image.
    pub file: PathBuf,
    /// Decoded species label, lowercase.
    pub label: String,
    /// Classification confidence in `[0, 1]`.
    pub confidence: f32,
    /// Fire check verdict.
    pub fire_label: String,
    /// Fire check confidence.
    pub fire_confidence: f32,
    /// Number of poaching-zone boxes.
    pub boxes: usize,
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
}

/// Writer for one result file format.
pub trait ResultWriter {
    /// File extension this writer produces.
    fn extension(&self) -> &'static str;

    /// Write the record to the given path.
    fn write(&self, record: &ImageRecord, path: &Path) -> Result<()>;
}

/// Instantiate the writer for a format.
pub fn writer_for(format: OutputFormat) -> Box<dyn ResultWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter),
        OutputFormat::Csv => Box::new(CsvWriter),
    }
}

/// Result file path for an input image and format.
pub fn output_path_for(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), std::ffi::OsStr::to_os_string);
    let mut name = stem;
    name.push(writer_for(format).extension());
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_json() {
        let path = output_path_for(Path::new("/data/zebra.jpg"), OutputFormat::Json);
        assert_eq!(path, PathBuf::from("/data/zebra.wilda.json"));
    }

    #[test]
    fn test_output_path_for_csv() {
        let path = output_path_for(Path::new("photo.png"), OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("photo.wilda.results.csv"));
    }
}
