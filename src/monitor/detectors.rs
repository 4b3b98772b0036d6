use posture_signals::pose::StretchCriteria;
use posture_signals::{
    mean_eye_aspect_ratio, DrowsinessConfig, DrowsinessStateMachine, Event, StretchConfig,
    StretchStateMachine,
};

use crate::config::DetectorKind;
use crate::frames::FrameSignals;

/// A plug-in state machine driven once per frame by the pipeline.
pub trait Detector: Send {
    fn kind(&self) -> DetectorKind;

    /// At most one event per frame.
    fn observe(&mut self, frame: &FrameSignals) -> Option<Event>;

    /// Per-frame diagnostic line, logged when the debug overlay is enabled.
    fn log_overlay(&self, frame: &FrameSignals);
}

pub struct DrowsinessDetector {
    machine: DrowsinessStateMachine,
    last_ear: Option<f64>,
    degenerate_frames: u64,
}

impl DrowsinessDetector {
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            machine: DrowsinessStateMachine::new(config),
            last_ear: None,
            degenerate_frames: 0,
        }
    }

    pub fn machine(&self) -> &DrowsinessStateMachine {
        &self.machine
    }

    pub fn degenerate_frames(&self) -> u64 {
        self.degenerate_frames
    }
}

impl Detector for DrowsinessDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Drowsiness
    }

    fn observe(&mut self, frame: &FrameSignals) -> Option<Event> {
        // 无人脸的帧不推进状态机
        let face = frame.primary_face()?;

        let ear = match mean_eye_aspect_ratio(&face.left, &face.right) {
            Ok(ear) => ear,
            Err(e) => {
                self.degenerate_frames += 1;
                self.last_ear = None;
                tracing::debug!(
                    frame = frame.index,
                    error = %e,
                    "Skipping face with degenerate eyes"
                );
                return None;
            }
        };

        self.last_ear = Some(ear);
        self.machine.update(ear, frame.timestamp)
    }

    fn log_overlay(&self, frame: &FrameSignals) {
        let state = self.machine.state();
        tracing::info!(
            frame = frame.index,
            ear = ?self.last_ear,
            counter = state.counter,
            alarm = state.alarm_active,
            "drowsiness"
        );
    }
}

pub struct StretchDetector {
    machine: StretchStateMachine,
    criteria: StretchCriteria,
    last_match: bool,
}

impl StretchDetector {
    pub fn new(config: StretchConfig) -> Self {
        Self::with_criteria(config, StretchCriteria::default())
    }

    pub fn with_criteria(config: StretchConfig, criteria: StretchCriteria) -> Self {
        Self {
            machine: StretchStateMachine::new(config),
            criteria,
            last_match: false,
        }
    }

    pub fn machine(&self) -> &StretchStateMachine {
        &self.machine
    }
}

impl Detector for StretchDetector {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Stretch
    }

    fn observe(&mut self, frame: &FrameSignals) -> Option<Event> {
        // 未检测到人体时保持当前计时
        let pose = frame.pose.as_ref()?;
        self.last_match = self.criteria.classify(pose);
        self.machine.update(self.last_match, frame.timestamp)
    }

    fn log_overlay(&self, frame: &FrameSignals) {
        let state = self.machine.state();
        tracing::info!(
            frame = frame.index,
            stretching = self.last_match,
            elapsed = ?state.elapsed(frame.timestamp),
            alarm = state.alarm_sent,
            "stretch"
        );
    }
}
