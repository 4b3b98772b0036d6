#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("degenerate eye geometry: horizontal span {width} is too small")]
    DegenerateGeometry { width: f64 },
}
