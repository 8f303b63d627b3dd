//! Live-camera mode: capture sources, display sinks and the frame loop.

mod camera;
mod controller;
mod sink;

pub use camera::CameraSource;
pub use controller::{FrameLoop, LoopState, LoopSummary};
pub use sink::DirectorySink;

use crate::error::Result;
use crate::image::Frame;
use crate::inference::Prediction;
use image::RgbImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Source of raw frames, exclusively owned by the frame loop while running.
pub trait FrameSource {
    /// Pull the next frame.
    ///
    /// `Ok(None)` means the stream ended cleanly; an error means the device
    /// failed. Either way the loop leaves the running state.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Destination for annotated frames, refreshed once per loop iteration.
pub trait FrameSink {
    /// Publish one annotated frame together with its prediction.
    fn publish(&mut self, frame: &RgbImage, prediction: &Prediction) -> Result<()>;
}

/// Cooperative cancellation token for the frame loop.
///
/// Cloneable so the host (Ctrl+C handler, UI) can request a stop from
/// anywhere; the loop checks it once per iteration, never preemptively.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Fresh signal in the not-stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the loop stop at its next checkpoint.
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_shared_across_clones() {
        let signal = StopSignal::new();
        let clone = signal.clone();
        assert!(!signal.is_stop_requested());

        clone.request_stop();
        assert!(signal.is_stop_requested());
    }
}
