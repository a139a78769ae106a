//! Contact form submission.
//!
//! There is no mail backend; a valid message is acknowledged after a fixed
//! delay with a [`ContactReceipt`].

use super::rules::not_blank;
use crate::domain::error::Result;
use crate::infrastructure::latency::pause;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Simulated send time.
pub const SEND_LATENCY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub subject: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}

/// Acknowledgement of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub email: String,
    pub subject: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContactService {
    latency: Duration,
}

impl ContactService {
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Validates and "sends" `form`.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::Validation`](crate::JobBoardError::Validation) naming
    /// `name`, `email` or `message`. Validation happens before the delay.
    pub async fn send(&self, form: ContactForm) -> Result<ContactReceipt> {
        form.validate()?;
        pause(self.latency).await;

        let subject = if form.subject.trim().is_empty() {
            "General inquiry".to_string()
        } else {
            form.subject.trim().to_string()
        };
        tracing::info!(email = %form.email, subject = %subject, "contact message sent");

        Ok(ContactReceipt {
            email: form.email,
            subject,
            received_at: Utc::now(),
        })
    }
}

impl Default for ContactService {
    fn default() -> Self {
        Self::new(SEND_LATENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn valid_message_is_acknowledged_after_delay() {
        let started = tokio::time::Instant::now();
        let receipt = ContactService::default()
            .send(ContactForm {
                name: "Grace".into(),
                email: "grace@example.com".into(),
                subject: String::new(),
                message: "Hello there".into(),
            })
            .await
            .unwrap();

        assert!(started.elapsed() >= SEND_LATENCY);
        assert_eq!(receipt.subject, "General inquiry");
        assert_eq!(receipt.email, "grace@example.com");
    }

    #[tokio::test]
    async fn missing_fields_are_named() {
        let err = ContactService::new(Duration::ZERO)
            .send(ContactForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.fields(), ["email", "message", "name"]);
    }
}
