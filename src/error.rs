//! Error types for wilda.

/// Result type alias for wilda operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for wilda.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Model file does not exist and no download URL is configured.
    #[error("model file does not exist: {path} (set model.url to enable download)")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Failed to read class map file.
    #[error("failed to read class map file '{path}'")]
    ClassMapRead {
        /// Path to the class map file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse class map file.
    #[error("failed to parse class map file '{path}'")]
    ClassMapParse {
        /// Path to the class map file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Class map is not a bijection onto a dense index range.
    #[error("invalid class map: {message}")]
    ClassMapInvalid {
        /// Description of the bijection violation.
        message: String,
    },

    /// Download failed.
    #[error("failed to download from '{url}'")]
    DownloadFailed {
        /// URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Downloaded artifact did not match its expected checksum.
    #[error("checksum mismatch for '{path}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Path to the rejected artifact.
        path: std::path::PathBuf,
        /// Expected SHA-256 hex digest.
        expected: String,
        /// Actual SHA-256 hex digest.
        actual: String,
    },

    /// Failed to open or decode an image file.
    #[error("failed to open image '{path}'")]
    ImageOpen {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// Input image is outside the preprocessing contract.
    #[error("unsupported image: {reason}")]
    UnsupportedImage {
        /// Why the image was rejected.
        reason: String,
    },

    /// Failed to encode or save an image file.
    #[error("failed to save image '{path}'")]
    ImageSave {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying encode error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to open the capture device.
    #[error("failed to open capture device '{device}': {reason}")]
    CameraOpen {
        /// Device path.
        device: String,
        /// Description of the failure.
        reason: String,
    },

    /// Failed to pull a frame from the capture source.
    #[error("capture failed: {reason}")]
    Capture {
        /// Description of the capture failure.
        reason: String,
    },

    /// Failed to build the inference session.
    #[error("failed to build classifier session: {reason}")]
    SessionBuild {
        /// Description of the build failure.
        reason: String,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Classifier output does not line up with the class map.
    #[error("model produced {scores} scores but class map has {classes} classes")]
    ScoreCountMismatch {
        /// Number of scores in the output vector.
        scores: usize,
        /// Number of classes in the class map.
        classes: usize,
    },

    /// No input image files were found.
    #[error("no valid image files found in the provided paths")]
    NoValidImageFiles,

    /// Failed to write a results file.
    #[error("failed to write results file '{path}'")]
    ResultsWrite {
        /// Path to the results file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to load the overlay font.
    #[error("failed to load overlay font '{path}'")]
    FontLoad {
        /// Path to the font file.
        path: std::path::PathBuf,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
