use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{TELEGRAM, TelegramCredentials};
use crate::error::MonitorError;
use crate::notify::Notifier;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

struct Target {
    url: String,
    chat_id: String,
}

/// Bot API `sendMessage`. Without a complete token/chat pair every send is a silent no-op.
pub struct TelegramNotifier {
    http: Client,
    target: Option<Target>,
}

impl TelegramNotifier {
    pub fn new(credentials: &TelegramCredentials) -> anyhow::Result<Self> {
        Self::with_api_base(credentials, TELEGRAM.api_base_url)
    }

    pub fn with_api_base(credentials: &TelegramCredentials, api_base: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(TELEGRAM.timeout_ms))
            .build()
            .context("build reqwest client")?;

        let target = match (&credentials.bot_token, &credentials.chat_id) {
            (Some(token), Some(chat_id)) => Some(Target {
                url: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
                chat_id: chat_id.clone(),
            }),
            _ => {
                log::warn!("Telegram bot token or chat id missing. Alerts will only be logged.");
                None
            }
        };
        Ok(Self { http, target })
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_alert(&self, text: &str) -> Result<(), MonitorError> {
        let Some(target) = &self.target else {
            return Ok(());
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_alert_text {
            log::info!("Sending alert:\n{}", text);
        }

        let payload = SendMessage {
            chat_id: &target.chat_id,
            text,
            parse_mode: TELEGRAM.parse_mode,
        };
        let resp = self
            .http
            .post(&target.url)
            .json(&payload)
            .send()
            .await
            // Drop the URL from the error, it carries the token
            .map_err(|e| MonitorError::NotificationDelivery(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MonitorError::NotificationDelivery(format!(
                "Telegram HTTP {}: {}",
                status, body
            )));
        }
        log::info!("Telegram message sent successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, http::Uri};
    use serde_json::Value;
    use tokio::sync::mpsc;

    type Captured = mpsc::UnboundedSender<(String, Value)>;

    async fn capture(
        State(tx): State<Captured>,
        uri: Uri,
        Json(body): Json<Value>,
    ) -> (StatusCode, &'static str) {
        let _ = tx.send((uri.path().to_string(), body));
        (StatusCode::OK, r#"{"ok":true}"#)
    }

    async fn reject() -> (StatusCode, &'static str) {
        (StatusCode::BAD_REQUEST, r#"{"ok":false}"#)
    }

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn credentials() -> TelegramCredentials {
        TelegramCredentials {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("-42".to_string()),
        }
    }

    #[tokio::test]
    async fn posts_markdown_message_to_bot_endpoint() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let base = spawn(Router::new().fallback(capture).with_state(tx)).await;

        let notifier = TelegramNotifier::with_api_base(&credentials(), &base).unwrap();
        notifier.send_alert("*hello*").await.unwrap();

        let (path, body) = rx.recv().await.unwrap();
        assert_eq!(path, "/bot123:abc/sendMessage");
        assert_eq!(body["chat_id"], "-42");
        assert_eq!(body["text"], "*hello*");
        assert_eq!(body["parse_mode"], "Markdown");
    }

    #[tokio::test]
    async fn non_success_status_is_a_delivery_error() {
        let base = spawn(Router::new().fallback(reject)).await;
        let notifier = TelegramNotifier::with_api_base(&credentials(), &base).unwrap();
        let err = notifier.send_alert("x").await.unwrap_err();
        assert!(matches!(err, MonitorError::NotificationDelivery(_)));
    }

    #[tokio::test]
    async fn missing_credentials_make_sends_a_no_op() {
        let creds = TelegramCredentials {
            bot_token: Some("123:abc".to_string()),
            chat_id: None,
        };
        // Unroutable base: any real request would fail
        let notifier = TelegramNotifier::with_api_base(&creds, "http://127.0.0.1:1").unwrap();
        assert!(!notifier.is_enabled());
        assert!(notifier.send_alert("x").await.is_ok());
    }
}
