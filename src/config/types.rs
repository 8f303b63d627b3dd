//! Configuration type definitions.

use crate::constants::{DEFAULT_CLASS_MAP_PATH, DEFAULT_MODEL_PATH, DEFAULT_MODEL_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classifier model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Inference settings.
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Overlay rendering settings.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Configuration for the classifier model.
///
/// The normalization convention and the logits flag travel with the model
/// artifact: they describe how the model was trained and exported, not user
/// preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX model file.
    pub path: PathBuf,

    /// Path to the class map JSON file (`{name: index}`).
    pub class_map: PathBuf,

    /// Remote URL the model is fetched from when the local file is absent.
    pub url: Option<String>,

    /// Expected SHA-256 hex digest of the model artifact.
    pub sha256: Option<String>,

    /// Pixel normalization convention the model was trained with.
    pub normalization: Normalization,

    /// Whether the model emits raw logits (softmax is applied after the
    /// forward pass) rather than probabilities.
    pub logits: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            class_map: PathBuf::from(DEFAULT_CLASS_MAP_PATH),
            url: Some(DEFAULT_MODEL_URL.to_string()),
            sha256: None,
            normalization: Normalization::default(),
            logits: false,
        }
    }
}

/// Pixel normalization conventions.
///
/// Which one applies is fixed at training time; picking the wrong one does
/// not fail, it silently shifts accuracy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Scale to `[0, 1]`.
    Unit,
    /// Scale to `[-1, 1]`.
    Symmetric,
    /// Scale to `[0, 1]`, then subtract the ImageNet per-channel mean and
    /// divide by the per-channel standard deviation.
    #[default]
    Imagenet,
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output formats for per-image result files.
    pub formats: Vec<OutputFormat>,

    /// Whether to save the annotated image next to each input.
    pub save_annotated: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Json],
            save_annotated: true,
        }
    }
}

/// Inference device configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InferenceDevice {
    /// Automatically select (GPU if available, else CPU).
    #[default]
    Auto,
    /// Force GPU (CUDA), fall back to CPU with a warning.
    Gpu,
    /// Force CPU inference.
    Cpu,
}

/// Inference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Device to use for inference.
    pub device: InferenceDevice,

    /// Number of intra-op threads for the session.
    pub intra_threads: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            device: InferenceDevice::Auto,
            intra_threads: 2,
        }
    }
}

/// Overlay rendering settings for the live mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Path to a TTF/OTF font used to burn the label into published frames.
    /// When unset, frames carry only the box overlay and a warning is logged
    /// once.
    pub font: Option<PathBuf>,
}

/// Supported result file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON result record.
    Json,
    /// Generic CSV format.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!(
            "json".parse::<OutputFormat>().ok(),
            Some(OutputFormat::Json)
        );
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_model_config_defaults() {
        let model = ModelConfig::default();
        assert_eq!(model.path, PathBuf::from("models/animal_classifier.onnx"));
        assert_eq!(model.class_map, PathBuf::from("class_to_idx.json"));
        assert_eq!(model.normalization, Normalization::Imagenet);
        assert!(!model.logits);
        assert!(model.url.is_some());
    }

    #[test]
    fn test_defaults_config_default_values() {
        let defaults = DefaultsConfig::default();
        assert_eq!(defaults.formats, vec![OutputFormat::Json]);
        assert!(defaults.save_annotated);
    }
}
