use serde::Serialize;

use posture_signals::Event;

/// JSON body of every outbound notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub source: String,
}

/// One outbound delivery, carrying its own copy of the endpoint and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event: Event,
    pub url: String,
    pub payload: NotificationPayload,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("notification rejected: status={status}")]
    Status { status: u16 },
}

/// Hands notifications off for delivery. `send` must return immediately;
/// delivery outcome is never reported back to the caller.
pub trait Transport: Send + Sync {
    fn send(&self, notification: Notification);
}

/// Fire-and-forget HTTP POST, one detached task per notification.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn deliver(
        client: &reqwest::Client,
        notification: &Notification,
    ) -> Result<(), NotifyError> {
        let response = client
            .post(&notification.url)
            .json(&notification.payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

impl Transport for HttpTransport {
    fn send(&self, notification: Notification) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                event = %notification.event,
                "No async runtime available, dropping notification"
            );
            return;
        };

        let client = self.client.clone();
        // 不保留 JoinHandle：投递失败只记录日志，不影响逐帧处理
        handle.spawn(async move {
            match Self::deliver(&client, &notification).await {
                Ok(()) => tracing::debug!(
                    event = %notification.event,
                    url = %notification.url,
                    "Notification delivered"
                ),
                Err(e) => tracing::warn!(
                    event = %notification.event,
                    url = %notification.url,
                    error = %e,
                    "Notification delivery failed"
                ),
            }
        });
    }
}
