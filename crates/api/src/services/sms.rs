//! Twilio SMS sender.
//!
//! Implements the SmsSender trait against the Twilio Programmable Messaging
//! REST API. Each call is a single request; failures are returned to the
//! caller without retry. Recipients are passed through unchanged so Twilio
//! decides what it accepts (E.164 numbers, `whatsapp:` addresses).

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use domain::services::{SmsDelivery, SmsError, SmsSender};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::TwilioConfig;

/// Message resource returned by Twilio on creation.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

/// Twilio error body.
#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    #[serde(default)]
    code: Option<u32>,
    message: String,
}

/// SMS sender backed by Twilio.
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio sender.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TwilioConfig) -> Result<Self, SmsError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SmsError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn message_form<'a>(&'a self, to: &'a str, body: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("To", to),
            ("From", self.config.phone_number.as_str()),
            ("Body", body),
        ]
    }
}

#[async_trait]
impl SmsSender for TwilioSmsService {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SmsDelivery, SmsError> {
        if !self.is_configured() {
            return Err(SmsError::NotConfigured);
        }

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&self.message_form(to, body))
            .send()
            .await
            .map_err(|e| SmsError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TwilioErrorResponse>(&raw)
                .map(|e| match e.code {
                    Some(code) => format!("{} (code {})", e.message, code),
                    None => e.message,
                })
                .unwrap_or(raw);
            error!(status = %status, error = %message, "Twilio API error");
            return Err(SmsError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let message: MessageResource = response
            .json()
            .await
            .map_err(|e| SmsError::RequestFailed(format!("Invalid Twilio response: {}", e)))?;

        info!(sid = %message.sid, to = %to, "SMS sent");

        Ok(SmsDelivery {
            sid: message.sid,
            to: to.to_string(),
            status: message.status,
            accepted_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TwilioConfig {
        TwilioConfig {
            account_sid: "AC0123456789".to_string(),
            auth_token: "token".to_string(),
            phone_number: "+15550100000".to_string(),
            api_base_url: "https://api.twilio.com/".to_string(),
            timeout_ms: 1_000,
        }
    }

    #[test]
    fn test_messages_url() {
        let service = TwilioSmsService::new(configured()).unwrap();
        assert_eq!(
            service.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC0123456789/Messages.json"
        );
    }

    #[test]
    fn test_message_form() {
        let service = TwilioSmsService::new(configured()).unwrap();
        let form = service.message_form("+15550199999", "Appointment tomorrow at 9");
        assert_eq!(
            form,
            [
                ("To", "+15550199999"),
                ("From", "+15550100000"),
                ("Body", "Appointment tomorrow at 9"),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_without_credentials() {
        let service = TwilioSmsService::new(TwilioConfig::default()).unwrap();
        assert!(!service.is_configured());

        let result = service.send_sms("+15550199999", "Hello").await;
        assert!(matches!(result, Err(SmsError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_channel_address_is_passed_to_provider() {
        // Nothing listens on the discard port, so the request itself fails.
        let service = TwilioSmsService::new(TwilioConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..configured()
        })
        .unwrap();

        let result = service.send_sms("whatsapp:+15550199999", "Hello").await;

        assert!(matches!(result, Err(SmsError::RequestFailed(_))));
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#;
        let parsed: TwilioErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, Some(21211));
        assert!(parsed.message.contains("not a valid phone number"));
    }

    #[test]
    fn test_parse_message_resource() {
        let body = r#"{"sid": "SM123", "status": "queued", "to": "+15550199999"}"#;
        let parsed: MessageResource = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.sid, "SM123");
        assert_eq!(parsed.status.as_deref(), Some("queued"));
    }
}
