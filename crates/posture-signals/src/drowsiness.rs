//! 困倦检测状态机
//!
//! 逐帧输入 EAR：
//! - EAR 低于阈值时计数器加一；连续达到 `consecutive_frames` 帧时首次触发 `Sleepy`
//! - 告警持续期间，每隔 `resend_interval_secs` 重发一次 `Sleepy`（心跳）
//! - EAR 回到阈值及以上时计数器清零，若告警处于激活状态则恰好发出一次 `Awake`
//!
//! 计数未达阈值时不发任何事件。

use crate::event::Event;

pub const DEFAULT_EAR_THRESHOLD: f64 = 0.32;
pub const DEFAULT_CONSECUTIVE_FRAMES: u32 = 48;
pub const DEFAULT_RESEND_INTERVAL_SECS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrowsinessConfig {
    /// 低于此 EAR 视为闭眼
    pub ear_threshold: f64,
    /// 触发告警所需的连续闭眼帧数
    pub consecutive_frames: u32,
    /// 告警期间心跳重发间隔（秒）
    pub resend_interval_secs: f64,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
            consecutive_frames: DEFAULT_CONSECUTIVE_FRAMES,
            resend_interval_secs: DEFAULT_RESEND_INTERVAL_SECS,
        }
    }
}

/// 困倦检测状态，仅由所属状态机逐帧修改
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrowsinessState {
    pub counter: u32,
    pub alarm_active: bool,
    /// 最近一次发出 `Sleepy` 的时间戳（秒）
    pub last_sent_at: Option<f64>,
}

impl DrowsinessState {
    /// 推进一帧，`timestamp` 单位为秒
    pub fn advance(
        &mut self,
        config: &DrowsinessConfig,
        ear: f64,
        timestamp: f64,
    ) -> Option<Event> {
        if !ear.is_finite() {
            return None;
        }

        if ear >= config.ear_threshold {
            self.counter = 0;
            if self.alarm_active {
                self.alarm_active = false;
                return Some(Event::Awake);
            }
            return None;
        }

        self.counter = self.counter.saturating_add(1);
        if self.counter < config.consecutive_frames {
            return None;
        }

        if !self.alarm_active {
            self.alarm_active = true;
            self.last_sent_at = Some(timestamp);
            return Some(Event::Sleepy);
        }

        let due = match self.last_sent_at {
            Some(last) => timestamp - last >= config.resend_interval_secs,
            None => true,
        };
        if due {
            self.last_sent_at = Some(timestamp);
            return Some(Event::Sleepy);
        }
        None
    }
}

/// 困倦检测状态机
#[derive(Debug, Clone, Default)]
pub struct DrowsinessStateMachine {
    config: DrowsinessConfig,
    state: DrowsinessState,
}

impl DrowsinessStateMachine {
    pub fn new(config: DrowsinessConfig) -> Self {
        Self {
            config,
            state: DrowsinessState::default(),
        }
    }

    pub fn update(&mut self, ear: f64, timestamp: f64) -> Option<Event> {
        self.state.advance(&self.config, ear, timestamp)
    }

    pub fn state(&self) -> &DrowsinessState {
        &self.state
    }

    pub fn config(&self) -> &DrowsinessConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.state = DrowsinessState::default();
    }
}
