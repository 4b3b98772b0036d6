pub mod dispatcher;
pub mod transport;

pub use dispatcher::{normalize_base_url, CooldownGate, DispatchOutcome, Dispatcher};
pub use transport::{HttpTransport, Notification, NotificationPayload, NotifyError, Transport};
