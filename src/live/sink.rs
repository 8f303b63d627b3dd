//! Display sink writing annotated frames to a directory.

use crate::error::{Error, Result};
use crate::inference::Prediction;
use crate::live::FrameSink;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sink that records annotated frames as numbered PNGs.
///
/// Stands in for a live display: the presentation layer polls the newest
/// file, or a user inspects the recording afterwards.
pub struct DirectorySink {
    dir: PathBuf,
    next_index: u64,
}

impl DirectorySink {
    /// Create the sink, making the directory if needed.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(Error::Io)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            next_index: 0,
        })
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.next_index
    }
}

impl FrameSink for DirectorySink {
    fn publish(&mut self, frame: &RgbImage, prediction: &Prediction) -> Result<()> {
        let path = self.dir.join(format!("frame_{:06}.png", self.next_index));
        frame.save(&path).map_err(|e| Error::ImageSave {
            path: path.clone(),
            source: e,
        })?;
        debug!(
            "Published {} ({} {:.1}%)",
            path.display(),
            prediction.label,
            prediction.confidence * 100.0
        );
        self.next_index += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_writes_numbered_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).unwrap();
        let frame = RgbImage::new(8, 8);
        let prediction = Prediction {
            label: "lion".to_string(),
            confidence: 0.5,
        };

        sink.publish(&frame, &prediction).unwrap();
        sink.publish(&frame, &prediction).unwrap();

        assert_eq!(sink.frames_written(), 2);
        assert!(dir.path().join("frame_000000.png").exists());
        assert!(dir.path().join("frame_000001.png").exists());
    }
}
