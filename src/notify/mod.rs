// Outbound alerts
pub mod message;
pub mod telegram;

use async_trait::async_trait;

use crate::error::MonitorError;

pub use message::format_alert;
pub use telegram::TelegramNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fire and forget. Delivery failures are reported but never retried.
    async fn send_alert(&self, text: &str) -> Result<(), MonitorError>;
}
