use std::collections::HashMap;
use std::sync::Arc;

use posture_signals::Event;

use crate::config::NotifyConfig;
use crate::notify::transport::{Notification, NotificationPayload, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Suppressed,
}

/// Per-event-kind cool-down. A repeat of the same kind inside the window is
/// dropped; admitting `Sleepy` or `Awake` clears its counterpart so an edge
/// transition is never swallowed.
#[derive(Debug, Clone, Default)]
pub struct CooldownGate {
    cooldown_secs: f64,
    last_sent: HashMap<Event, f64>,
}

impl CooldownGate {
    pub fn new(cooldown_secs: f64) -> Self {
        Self {
            cooldown_secs,
            last_sent: HashMap::new(),
        }
    }

    pub fn admit(&mut self, event: Event, timestamp: f64) -> bool {
        if let Some(&last) = self.last_sent.get(&event) {
            if timestamp - last < self.cooldown_secs {
                return false;
            }
        }
        self.last_sent.insert(event, timestamp);
        if let Some(other) = event.counterpart() {
            self.last_sent.remove(&other);
        }
        true
    }
}

/// Trailing slashes are dropped so `{base}{path}` never doubles the separator.
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub struct Dispatcher {
    base_url: String,
    source_tag: String,
    gate: CooldownGate,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(config: &NotifyConfig, base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            source_tag: config.source_tag.clone(),
            gate: CooldownGate::new(config.cooldown_secs),
            transport,
        }
    }

    pub fn endpoint_url(&self, event: Event) -> String {
        format!("{}{}", self.base_url, event.endpoint_path())
    }

    pub fn dispatch(&mut self, event: Event, timestamp: f64) -> DispatchOutcome {
        if !self.gate.admit(event, timestamp) {
            tracing::trace!(%event, timestamp, "Notification suppressed by cool-down");
            return DispatchOutcome::Suppressed;
        }

        let url = self.endpoint_url(event);
        tracing::info!(%event, %url, "Sending notification");
        self.transport.send(Notification {
            event,
            url,
            payload: NotificationPayload {
                source: self.source_tag.clone(),
            },
        });
        DispatchOutcome::Sent
    }
}
