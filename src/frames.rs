//! NDJSON frame source.
//!
//! Landmark extraction runs upstream; each line carries one frame:
//!
//! ```json
//! {"timestamp": 12.5,
//!  "faces": [{"left": [[x, y], ...6], "right": [[x, y], ...6]}],
//!  "pose": {"nose": {"x": 0, "y": 0, "visibility": 0.9}, "leftShoulder": {...}, ...}}
//! ```
//!
//! `timestamp` (seconds) is optional and falls back to a monotonic session clock.
//! Lines are split on raw bytes; a line that is not valid UTF-8 is malformed
//! like any other bad JSON and does not end the stream.

use std::pin::Pin;
use std::time::Instant;

use posture_signals::{EyeContour, PoseFrame};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::SplitStream;
use tokio_stream::StreamExt;

use crate::constants::STDIN_FRAME_SOURCE;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FaceLandmarks {
    pub left: EyeContour,
    pub right: EyeContour,
}

#[derive(Debug, Deserialize)]
struct WireFrame {
    #[serde(default)]
    timestamp: Option<f64>,
    #[serde(default)]
    faces: Vec<FaceLandmarks>,
    #[serde(default)]
    pose: Option<PoseFrame>,
}

/// One frame worth of geometric signals.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSignals {
    pub index: u64,
    /// Seconds.
    pub timestamp: f64,
    pub faces: Vec<FaceLandmarks>,
    pub pose: Option<PoseFrame>,
}

impl FrameSignals {
    pub fn new(index: u64, timestamp: f64) -> Self {
        Self {
            index,
            timestamp,
            faces: Vec::new(),
            pose: None,
        }
    }

    /// Only the first detected face is monitored.
    pub fn primary_face(&self) -> Option<&FaceLandmarks> {
        self.faces.first()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("failed to open frame source '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("frame source read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frame at line {line}: {source}")]
    Malformed {
        line: u64,
        source: serde_json::Error,
    },
}

pub type BoxedSource = Pin<Box<dyn AsyncBufRead + Send>>;

pub struct FrameReader<R> {
    lines: SplitStream<R>,
    line_no: u64,
    next_index: u64,
    clock: Instant,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: SplitStream::new(reader.split(b'\n')),
            line_no: 0,
            next_index: 0,
            clock: Instant::now(),
        }
    }

    /// `Ok(None)` at end of stream. A malformed line is reported once and
    /// consumed, so the next call continues after it.
    pub async fn next_frame(&mut self) -> Result<Option<FrameSignals>, FrameError> {
        while let Some(line) = self.lines.next().await {
            let line = line?;
            self.line_no += 1;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            // serde_json 自行校验 UTF-8，CRLF 行尾的 \r 作为空白被接受
            let wire: WireFrame =
                serde_json::from_slice(&line).map_err(|source| FrameError::Malformed {
                    line: self.line_no,
                    source,
                })?;

            let timestamp = wire
                .timestamp
                .filter(|t| t.is_finite())
                .unwrap_or_else(|| self.clock.elapsed().as_secs_f64());

            let frame = FrameSignals {
                index: self.next_index,
                timestamp,
                faces: wire.faces,
                pose: wire.pose,
            };
            self.next_index += 1;
            return Ok(Some(frame));
        }
        Ok(None)
    }

    pub fn line_no(&self) -> u64 {
        self.line_no
    }
}

/// Opens `path` as a frame source; `-` reads stdin.
pub async fn open_source(path: &str) -> Result<FrameReader<BoxedSource>, FrameError> {
    let reader: BoxedSource = if path == STDIN_FRAME_SOURCE {
        Box::pin(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| FrameError::Open {
                path: path.to_string(),
                source,
            })?;
        Box::pin(BufReader::new(file))
    };
    Ok(FrameReader::new(reader))
}
