//! Frame loop: read frame → detectors → dispatcher, one frame at a time.

pub mod detectors;
pub mod pipeline;

use std::future::Future;

use tokio::io::AsyncBufRead;

use crate::frames::{FrameError, FrameReader, FrameSignals};
use crate::notify::{DispatchOutcome, Dispatcher};

pub use detectors::{Detector, DrowsinessDetector, StretchDetector};
pub use pipeline::Pipeline;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub malformed_frames: u64,
    pub events_emitted: u64,
    pub events_sent: u64,
    pub events_suppressed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    Shutdown,
    SourceError,
}

pub struct Monitor {
    pipeline: Pipeline,
    dispatcher: Dispatcher,
    debug_overlay: bool,
    summary: SessionSummary,
}

impl Monitor {
    pub fn new(pipeline: Pipeline, dispatcher: Dispatcher, debug_overlay: bool) -> Self {
        Self {
            pipeline,
            dispatcher,
            debug_overlay,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Synchronous per-frame step; never waits on delivery.
    pub fn process_frame(&mut self, frame: &FrameSignals) {
        self.summary.frames += 1;

        for event in self.pipeline.process(frame) {
            self.summary.events_emitted += 1;
            match self.dispatcher.dispatch(event, frame.timestamp) {
                DispatchOutcome::Sent => self.summary.events_sent += 1,
                DispatchOutcome::Suppressed => self.summary.events_suppressed += 1,
            }
        }

        if self.debug_overlay {
            self.pipeline.log_overlay(frame);
        }
    }

    /// Runs until end of stream, an unrecoverable read error, or `shutdown`
    /// resolves. In-flight deliveries are left to finish on their own.
    pub async fn run<R, S>(&mut self, mut reader: FrameReader<R>, shutdown: S) -> StopReason
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => return StopReason::Shutdown,
                next = reader.next_frame() => next,
            };

            match next {
                Ok(Some(frame)) => self.process_frame(&frame),
                Ok(None) => return StopReason::EndOfStream,
                Err(FrameError::Malformed { line, source }) => {
                    self.summary.malformed_frames += 1;
                    tracing::warn!(line, error = %source, "Skipping malformed frame");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Frame source failed");
                    return StopReason::SourceError;
                }
            }
        }
    }
}
