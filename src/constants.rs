//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "wilda";

/// Classifier input geometry.
///
/// The model was trained on 224x224 RGB crops; the preprocessor resizes
/// every input to exactly this shape. Changing either value without
/// retraining the model silently degrades accuracy.
pub mod input {
    /// Input tensor height in pixels.
    pub const HEIGHT: u32 = 224;
    /// Input tensor width in pixels.
    pub const WIDTH: u32 = 224;
    /// Number of color channels the classifier expects.
    pub const CHANNELS: usize = 3;
}

/// Default local path for the classifier artifact, relative to the working
/// directory.
pub const DEFAULT_MODEL_PATH: &str = "models/animal_classifier.onnx";

/// Default path for the class map file.
pub const DEFAULT_CLASS_MAP_PATH: &str = "class_to_idx.json";

/// Remote location of the default classifier artifact.
pub const DEFAULT_MODEL_URL: &str =
    "https://drive.google.com/uc?export=download&id=1tV1RDM4ZuxNmSHnxl_xWh3DMu6ZhHzRi";

/// Suffix appended to the destination path while a download is in flight.
/// The partial file is renamed into place only after the full artifact
/// (and its checksum, when configured) has been verified.
pub const PARTIAL_DOWNLOAD_SUFFIX: &str = "part";

/// Channel-wise normalization statistics (ImageNet convention).
///
/// Applied after scaling pixels to `[0, 1]`. These are fixed by how the
/// classifier was trained and must be versioned alongside the model artifact.
pub mod imagenet {
    /// Per-channel mean (R, G, B).
    pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
    /// Per-channel standard deviation (R, G, B).
    pub const STD: [f32; 3] = [0.229, 0.224, 0.225];
}

/// Placeholder detector constants.
pub mod stub {
    /// Pixel inset of the fixed poaching-zone rectangle from each image edge.
    pub const POACHING_INSET: u32 = 50;
    /// Border thickness of the drawn rectangle.
    pub const POACHING_BORDER: u32 = 3;
    /// Fixed label returned by the fire placeholder.
    pub const FIRE_LABEL: &str = "no fire";
    /// Fixed confidence returned by the fire placeholder.
    pub const FIRE_CONFIDENCE: f32 = 0.98;
}

/// Live-mode overlay constants.
pub mod overlay {
    /// X position of the label text on published frames.
    pub const TEXT_X: i32 = 10;
    /// Y position of the label text on published frames.
    pub const TEXT_Y: i32 = 40;
    /// Font size of the label text.
    pub const FONT_SIZE: f32 = 28.0;
    /// Label text color (sky blue).
    pub const TEXT_COLOR: [u8; 3] = [56, 189, 248];
    /// Poaching-zone rectangle color (green).
    pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
}

/// Default V4L2 capture device.
pub const DEFAULT_CAMERA_DEVICE: &str = "/dev/video0";

/// Output file extensions by format.
pub mod output_extensions {
    /// CSV results extension.
    pub const CSV: &str = ".wilda.results.csv";
    /// JSON results extension.
    pub const JSON: &str = ".wilda.json";
    /// Annotated image extension.
    pub const ANNOTATED: &str = ".wilda.png";
}

/// Tolerance when checking that a score vector forms a probability
/// distribution.
pub const PROBABILITY_SUM_TOLERANCE: f32 = 1e-4;
