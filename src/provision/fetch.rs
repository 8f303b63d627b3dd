//! Model download with checksum verification and atomic placement.

use crate::constants::PARTIAL_DOWNLOAD_SUFFIX;
use crate::error::{Error, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Ensure the model artifact exists at `local_path`, fetching it from `url`
/// on first use.
///
/// Idempotent: when the file is already present this performs no network
/// access at all. The download is streamed to `<local_path>.part` and only
/// renamed into place after it completes (and its SHA-256 digest matches,
/// when one is configured), so an interrupted fetch can never leave a
/// truncated file that is later mistaken for a valid artifact.
///
/// A fetch failure is fatal for the caller: there is no model to fall back
/// to.
pub async fn ensure_model(
    local_path: &Path,
    url: &str,
    sha256: Option<&str>,
) -> Result<PathBuf> {
    if local_path.exists() {
        debug!("Model already present: {}", local_path.display());
        return Ok(local_path.to_path_buf());
    }

    info!("Model not found locally, downloading from {url}");

    if let Some(parent) = local_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    let client = Client::builder()
        .connect_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(300))
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create HTTP client: {e}"),
        })?;

    let partial_path = partial_path_for(local_path);
    download_file(&client, url, &partial_path).await?;

    if let Some(expected) = sha256 {
        verify_sha256(&partial_path, expected)?;
    }

    std::fs::rename(&partial_path, local_path).map_err(Error::Io)?;
    info!("Model saved to {}", local_path.display());

    Ok(local_path.to_path_buf())
}

/// Blocking wrapper around [`ensure_model`] for synchronous call sites.
pub fn ensure_model_blocking(
    local_path: &Path,
    url: &str,
    sha256: Option<&str>,
) -> Result<PathBuf> {
    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;
    runtime.block_on(ensure_model(local_path, url, sha256))
}

fn partial_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(PARTIAL_DOWNLOAD_SUFFIX);
    PathBuf::from(name)
}

/// Download a file with progress bar.
async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            source: format!("HTTP {}", response.status()).into(),
        });
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{bar:40.cyan/blue} {percent}% ({bytes}/{total_bytes})")
            .map_err(|e| Error::Internal {
                message: format!("Failed to create progress bar: {e}"),
            })?
            .progress_chars("█▓▒░ "),
    );
    pb.set_message(format!(
        "Downloading {}...",
        dest.file_name().map_or_else(
            || std::borrow::Cow::Borrowed("file"),
            |n| n.to_string_lossy()
        )
    ));

    let mut file = File::create(dest).await.map_err(Error::Io)?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        file.write_all(&chunk).await.map_err(Error::Io)?;

        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush().await.map_err(Error::Io)?;
    pb.finish_with_message("Download complete");

    Ok(())
}

/// Verify the SHA-256 digest of a downloaded artifact.
///
/// On mismatch the partial file is removed so a retry starts clean.
fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let contents = std::fs::read(path).map_err(Error::Io)?;
    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let actual = format!("{:x}", hasher.finalize());

    if actual.eq_ignore_ascii_case(expected) {
        debug!("Checksum verified for {}", path.display());
        Ok(())
    } else {
        let _ = std::fs::remove_file(path);
        Err(Error::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_artifact_short_circuits_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"artifact").unwrap();

        // The URL is unreachable nonsense: success proves no fetch happened.
        let result = ensure_model_blocking(&path, "https://invalid.invalid/model.onnx", None);
        assert!(result.is_ok());
        assert_eq!(std::fs::read(&path).unwrap(), b"artifact");
    }

    #[test]
    fn test_idempotent_second_call_leaves_artifact_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"artifact").unwrap();

        for _ in 0..2 {
            ensure_model_blocking(&path, "https://invalid.invalid/m.onnx", None).unwrap();
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"artifact");
    }

    #[test]
    fn test_missing_artifact_with_unreachable_url_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");

        let result = ensure_model_blocking(&path, "https://invalid.invalid/m.onnx", None);
        assert!(matches!(result, Err(Error::DownloadFailed { .. })));
        // No partial file left behind as the final artifact.
        assert!(!path.exists());
    }

    #[test]
    fn test_verify_sha256_accepts_matching_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        std::fs::write(&path, b"hello").unwrap();

        // sha256("hello")
        let expected = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";
        assert!(verify_sha256(&path, expected).is_ok());
    }

    #[test]
    fn test_verify_sha256_rejects_and_removes_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        std::fs::write(&path, b"hello").unwrap();

        let result = verify_sha256(&path, &"0".repeat(64));
        assert!(matches!(result, Err(Error::ChecksumMismatch { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_path_suffix() {
        let partial = partial_path_for(Path::new("models/animal_classifier.onnx"));
        assert_eq!(
            partial,
            PathBuf::from("models/animal_classifier.onnx.part")
        );
    }
}
