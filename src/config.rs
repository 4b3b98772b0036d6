use std::env;
use std::str::FromStr;

use posture_signals::drowsiness::{
    DEFAULT_CONSECUTIVE_FRAMES, DEFAULT_EAR_THRESHOLD, DEFAULT_RESEND_INTERVAL_SECS,
};
use posture_signals::stretch::DEFAULT_STRETCH_DURATION_SECS;
use posture_signals::{DrowsinessConfig, StretchConfig};

use crate::constants::{
    DEFAULT_DETECTORS, DEFAULT_NOTIFY_COOLDOWN_SECS, DEFAULT_SERVER_URL, DETECTOR_DROWSINESS,
    DETECTOR_STRETCH, NOTIFY_SOURCE_TAG, STDIN_FRAME_SOURCE,
};
use crate::logging::LogConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log: LogConfig,
    pub server_url: String,
    pub frame_source: String,
    pub debug_overlay: bool,
    pub detectors: String,
    pub drowsiness: DrowsinessConfig,
    pub stretch: StretchConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub cooldown_secs: f64,
    pub source_tag: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_NOTIFY_COOLDOWN_SECS,
            source_tag: NOTIFY_SOURCE_TAG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Drowsiness,
    Stretch,
}

impl DetectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drowsiness => DETECTOR_DROWSINESS,
            Self::Stretch => DETECTOR_STRETCH,
        }
    }
}

impl FromStr for DetectorKind {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            DETECTOR_DROWSINESS => Ok(Self::Drowsiness),
            DETECTOR_STRETCH => Ok(Self::Stretch),
            other => Err(ConfigError::UnknownDetector(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("{key} must be {expected}, got {value}")]
    OutOfRange {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("unknown detector '{0}' (expected drowsiness or stretch)")]
    UnknownDetector(String),
    #[error("no detectors enabled")]
    NoDetectors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            frame_source: STDIN_FRAME_SOURCE.to_string(),
            debug_overlay: false,
            detectors: DEFAULT_DETECTORS.to_string(),
            drowsiness: DrowsinessConfig::default(),
            stretch: StretchConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log: LogConfig::from_env(),
            server_url: env_or("SERVER_URL", DEFAULT_SERVER_URL),
            frame_source: env_or("FRAME_SOURCE", STDIN_FRAME_SOURCE),
            debug_overlay: env_or_bool("DEBUG_OVERLAY", false),
            detectors: env_or("DETECTORS", DEFAULT_DETECTORS),
            drowsiness: DrowsinessConfig {
                ear_threshold: env_or_parse("EAR_THRESHOLD", DEFAULT_EAR_THRESHOLD),
                consecutive_frames: env_or_parse("EAR_CONSEC_FRAMES", DEFAULT_CONSECUTIVE_FRAMES),
                resend_interval_secs: env_or_parse(
                    "RESEND_INTERVAL_SECS",
                    DEFAULT_RESEND_INTERVAL_SECS,
                ),
            },
            stretch: StretchConfig {
                duration_limit_secs: env_or_parse(
                    "STRETCH_DURATION_SECS",
                    DEFAULT_STRETCH_DURATION_SECS,
                ),
            },
            notify: NotifyConfig {
                cooldown_secs: env_or_parse("NOTIFY_COOLDOWN_SECS", DEFAULT_NOTIFY_COOLDOWN_SECS),
                source_tag: NOTIFY_SOURCE_TAG.to_string(),
            },
        }
    }

    /// Startup check; any error here is fatal before the first frame is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(self.server_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidServerUrl {
                    url: self.server_url.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigError::InvalidServerUrl {
                    url: self.server_url.clone(),
                    reason: e.to_string(),
                })
            }
        }

        let threshold = self.drowsiness.ear_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(out_of_range("EAR_THRESHOLD", "a positive number", threshold));
        }
        if self.drowsiness.consecutive_frames == 0 {
            return Err(out_of_range("EAR_CONSEC_FRAMES", "at least 1", 0));
        }
        check_non_negative("RESEND_INTERVAL_SECS", self.drowsiness.resend_interval_secs)?;
        check_non_negative("STRETCH_DURATION_SECS", self.stretch.duration_limit_secs)?;
        check_non_negative("NOTIFY_COOLDOWN_SECS", self.notify.cooldown_secs)?;

        self.enabled_detectors().map(|_| ())
    }

    /// Parses `DETECTORS` in order, dropping duplicates.
    pub fn enabled_detectors(&self) -> Result<Vec<DetectorKind>, ConfigError> {
        let mut kinds = Vec::new();
        for raw in self.detectors.split(',').filter(|s| !s.trim().is_empty()) {
            let kind = raw.parse::<DetectorKind>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            return Err(ConfigError::NoDetectors);
        }
        Ok(kinds)
    }
}

fn out_of_range(key: &'static str, expected: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        key,
        expected,
        value: value.to_string(),
    }
}

fn check_non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(out_of_range(key, "a non-negative number of seconds", value))
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// 进程环境变量是全局的，读写环境的测试需串行
#[cfg(test)]
pub(crate) fn env_lock() -> &'static std::sync::Mutex<()> {
    static LOCK: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
}
