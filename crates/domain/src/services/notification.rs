//! SMS notification abstractions.
//!
//! Provides the sender trait used by services that text patients, plus a
//! recording mock for development and tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while sending an SMS.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS provider not configured")]
    NotConfigured,

    #[error("SMS request failed: {0}")]
    RequestFailed(String),

    #[error("SMS provider returned {status}: {message}")]
    Provider { status: u16, message: String },
}

/// Receipt for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsDelivery {
    /// Provider-assigned message identifier.
    pub sid: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub accepted_at: DateTime<Utc>,
}

/// Sends text messages to phone numbers.
#[async_trait::async_trait]
pub trait SmsSender: Send + Sync {
    /// Submits `body` for delivery to `to`. Failures are returned, never retried.
    async fn send_sms(&self, to: &str, body: &str) -> Result<SmsDelivery, SmsError>;
}

/// A message captured by [`MockSmsSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub body: String,
}

/// Mock SMS sender for development and testing.
///
/// Records messages instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct MockSmsSender {
    /// Whether to simulate provider failures.
    pub simulate_failure: bool,
    sent: Arc<Mutex<Vec<SentSms>>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every send.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Messages recorded so far.
    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SmsSender for MockSmsSender {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SmsDelivery, SmsError> {
        if self.simulate_failure {
            tracing::debug!(to = %to, "Mock SMS: simulating failure");
            return Err(SmsError::Provider {
                status: 500,
                message: "Simulated failure".to_string(),
            });
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|e| SmsError::RequestFailed(e.to_string()))?;
        sent.push(SentSms {
            to: to.to_string(),
            body: body.to_string(),
        });

        tracing::info!(to = %to, body_len = body.len(), "Mock SMS: would send message");

        Ok(SmsDelivery {
            sid: format!("SM{:032}", sent.len()),
            to: to.to_string(),
            status: Some("queued".to_string()),
            accepted_at: Utc::now(),
        })
    }
}
