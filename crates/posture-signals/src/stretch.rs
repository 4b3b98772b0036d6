//! 伸展检测状态机
//!
//! 伸展姿态持续时间达到 `duration_limit_secs` 后，每个满足条件的帧都发出
//! `Stretching`；任意一帧姿态不满足即清零计时，没有宽限期。
//! 重复事件的限频由通知分发层负责。

use crate::event::Event;

pub const DEFAULT_STRETCH_DURATION_SECS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchConfig {
    pub duration_limit_secs: f64,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            duration_limit_secs: DEFAULT_STRETCH_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StretchState {
    /// 本次伸展开始时间（秒）
    pub stretch_started_at: Option<f64>,
    pub alarm_sent: bool,
}

impl StretchState {
    pub fn advance(
        &mut self,
        config: &StretchConfig,
        is_stretching: bool,
        timestamp: f64,
    ) -> Option<Event> {
        if !is_stretching {
            self.stretch_started_at = None;
            self.alarm_sent = false;
            return None;
        }

        let started = *self.stretch_started_at.get_or_insert(timestamp);
        if timestamp - started >= config.duration_limit_secs {
            self.alarm_sent = true;
            return Some(Event::Stretching);
        }
        None
    }

    /// 当前伸展已持续的时间，未在伸展时为 `None`
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.stretch_started_at.map(|started| (now - started).max(0.0))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StretchStateMachine {
    config: StretchConfig,
    state: StretchState,
}

impl StretchStateMachine {
    pub fn new(config: StretchConfig) -> Self {
        Self {
            config,
            state: StretchState::default(),
        }
    }

    pub fn update(&mut self, is_stretching: bool, timestamp: f64) -> Option<Event> {
        self.state.advance(&self.config, is_stretching, timestamp)
    }

    pub fn state(&self) -> &StretchState {
        &self.state
    }

    pub fn config(&self) -> &StretchConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.state = StretchState::default();
    }
}
