//! The capture -> preprocess -> classify -> annotate -> publish loop.

use crate::detect::Overlay;
use crate::error::Result;
use crate::inference::{AnalysisContext, Scorer};
use crate::live::{FrameSink, FrameSource, StopSignal};
use tracing::{debug, info, warn};

/// Loop controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Not running; no capture resource is held.
    #[default]
    Stopped,
    /// Actively pulling and processing frames.
    Running,
}

/// Summary of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Number of frames processed and published.
    pub frames: u64,
}

/// Two-state frame loop controller.
///
/// Single-threaded and cooperative: the stop signal is checked once per
/// iteration, and each iteration runs the full per-frame pipeline inline.
/// The capture source is owned by `run` for the duration of the running
/// state and dropped exactly once on every exit path, including
/// acquisition failure, pull failure and per-frame errors.
#[derive(Debug, Default)]
pub struct FrameLoop {
    state: LoopState,
}

impl FrameLoop {
    /// Controller in the stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Acquire a capture source and process frames until the stop signal
    /// fires, the stream ends, the frame budget is exhausted, or a frame
    /// fails.
    ///
    /// Acquisition failure surfaces the error and leaves the state
    /// `Stopped`. After any exit the state is `Stopped` and the source has
    /// been released.
    pub fn run<S, F, K, C>(
        &mut self,
        open: F,
        ctx: &mut AnalysisContext<C>,
        overlay: &mut Overlay,
        sink: &mut K,
        stop: &StopSignal,
        max_frames: Option<u64>,
    ) -> Result<LoopSummary>
    where
        S: FrameSource,
        F: FnOnce() -> Result<S>,
        K: FrameSink,
        C: Scorer,
    {
        debug_assert_eq!(self.state, LoopState::Stopped);

        // Acquisition: on failure the transition aborts before Running.
        let mut source = open()?;
        self.state = LoopState::Running;
        info!("Frame loop started");

        let result = self.pump(&mut source, ctx, overlay, sink, stop, max_frames);

        // Single release point for every exit path.
        drop(source);
        self.state = LoopState::Stopped;

        match &result {
            Ok(summary) => info!("Frame loop stopped after {} frame(s)", summary.frames),
            Err(e) => warn!("Frame loop stopped on error: {e}"),
        }
        result
    }

    fn pump<S, K, C>(
        &mut self,
        source: &mut S,
        ctx: &mut AnalysisContext<C>,
        overlay: &mut Overlay,
        sink: &mut K,
        stop: &StopSignal,
        max_frames: Option<u64>,
    ) -> Result<LoopSummary>
    where
        S: FrameSource,
        K: FrameSink,
        C: Scorer,
    {
        let mut frames = 0u64;

        loop {
            // Cooperative checkpoint, once per iteration.
            if stop.is_stop_requested() {
                debug!("Stop requested, leaving frame loop");
                break;
            }
            if let Some(budget) = max_frames
                && frames >= budget
            {
                debug!("Frame budget of {budget} reached");
                break;
            }

            let Some(frame) = source.next_frame()? else {
                info!("Capture stream ended");
                break;
            };

            let rgb = frame.into_rgb()?;
            let prediction = ctx.analyze(&rgb)?;

            let mut annotated = rgb;
            overlay.draw_label(&mut annotated, &prediction);
            sink.publish(&annotated, &prediction)?;

            frames += 1;
        }

        Ok(LoopSummary { frames })
    }
}
