//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
///
/// Startup-time failures: a config that fails here halts the process, there
/// is no degraded mode.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.model.path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "model.path must not be empty".to_string(),
        });
    }

    if config.model.class_map.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "model.class_map must not be empty".to_string(),
        });
    }

    if let Some(ref url) = config.model.url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(Error::ConfigValidation {
            message: format!("model.url must be an http(s) URL, got '{url}'"),
        });
    }

    if let Some(ref digest) = config.model.sha256
        && (digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()))
    {
        return Err(Error::ConfigValidation {
            message: "model.sha256 must be a 64-character hex digest".to_string(),
        });
    }

    if config.inference.intra_threads == 0 {
        return Err(Error::ConfigValidation {
            message: "inference.intra_threads must be at least 1".to_string(),
        });
    }

    if let Some(ref font) = config.overlay.font
        && !font.exists()
    {
        return Err(Error::ConfigValidation {
            message: format!("overlay.font does not exist: {}", font.display()),
        });
    }

    Ok(())
}
