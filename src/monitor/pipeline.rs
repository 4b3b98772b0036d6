use posture_signals::Event;

use crate::config::{Config, ConfigError, DetectorKind};
use crate::frames::FrameSignals;
use crate::monitor::detectors::{Detector, DrowsinessDetector, StretchDetector};

/// Enabled detectors, driven in configuration order by a single frame loop.
pub struct Pipeline {
    detectors: Vec<Box<dyn Detector>>,
}

impl Pipeline {
    pub fn new(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let detectors = config
            .enabled_detectors()?
            .into_iter()
            .map(|kind| -> Box<dyn Detector> {
                match kind {
                    DetectorKind::Drowsiness => {
                        Box::new(DrowsinessDetector::new(config.drowsiness))
                    }
                    DetectorKind::Stretch => Box::new(StretchDetector::new(config.stretch)),
                }
            })
            .collect();
        Ok(Self::new(detectors))
    }

    pub fn kinds(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    pub fn process(&mut self, frame: &FrameSignals) -> Vec<Event> {
        self.detectors
            .iter_mut()
            .filter_map(|detector| detector.observe(frame))
            .collect()
    }

    pub fn log_overlay(&self, frame: &FrameSignals) {
        for detector in &self.detectors {
            detector.log_overlay(frame);
        }
    }
}
