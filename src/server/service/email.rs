//! Outgoing mail.
//!
//! Services talk to an `EmailSender` trait object so the transport can be swapped:
//! Resend's HTTP API in deployments, a logging sender during development and a
//! recording sender in tests.

use async_trait::async_trait;
use resend_rs::{types::CreateEmailBaseOptions, Resend};

use crate::server::error::{internal::InternalError, AppError};

/// Plain-text message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Delivers a message.
    ///
    /// # Returns
    /// - `Ok(())` - Message accepted by the transport
    /// - `Err(AppError::InternalErr(EmailDelivery))` - Transport failure
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Development sender that writes messages to the log instead of delivering them.
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: String) -> Self {
        Self { from }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        tracing::info!(
            "[DEV MAIL] to={}, from={}, subject={}, body={}",
            message.to,
            self.from,
            message.subject,
            message.body
        );
        Ok(())
    }
}

/// Sender backed by the Resend HTTP API.
pub struct ResendEmailSender {
    client: Resend,
    from: String,
}

impl ResendEmailSender {
    /// # Arguments
    /// - `api_key` - Resend API key
    /// - `from` - Sender, either `addr` or `Name <addr>`
    pub fn new(api_key: &str, from: String) -> Self {
        Self {
            client: Resend::new(api_key),
            from,
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let email = CreateEmailBaseOptions::new(
            self.from.as_str(),
            [message.to.as_str()],
            message.subject.as_str(),
        )
        .with_text(&message.body);

        self.client.emails.send(email).await.map_err(|e| {
            AppError::from(InternalError::EmailDelivery {
                to: message.to.clone(),
                reason: e.to_string(),
            })
        })?;

        tracing::debug!("Sent \"{}\" to {}", message.subject, message.to);
        Ok(())
    }
}

/// Test sender that keeps every message and can be switched to fail.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: tokio::sync::Mutex<Vec<EmailMessage>>,
    fail: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl RecordingEmailSender {
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.set_failing(true);
        sender
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Extracts the raw token from the link in the most recent message.
    pub async fn last_token(&self) -> Option<String> {
        let sent = self.sent.lock().await;
        let body = &sent.last()?.body;
        let link = body.split_whitespace().last()?;
        let url = url::Url::parse(link).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
    }
}

#[cfg(test)]
#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(InternalError::EmailDelivery {
                to: message.to.clone(),
                reason: "transport disabled".to_string(),
            }
            .into());
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
