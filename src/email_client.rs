use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::email_address::EmailAddress;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

#[derive(thiserror::Error)]
pub enum NotifierError {
    #[error("Failed to deliver the email through the mail API.")]
    Delivery(#[from] reqwest::Error),
    #[error("The mail API refused the email: {0}")]
    Rejected(String),
}

impl std::fmt::Debug for NotifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::error_chain_fmt(self, f)
    }
}

/// Sends a single transactional email.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), NotifierError>;
}

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: EmailAddress,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody {
    personalizations: Vec<SengridPersonalization>,
    from: SengridEmail,
    subject: String,
    content: Vec<SengridContent>,
}

#[derive(serde::Serialize)]
struct SengridEmail {
    email: String,
}

#[derive(serde::Serialize)]
struct SengridPersonalization {
    to: Vec<SengridEmail>,
}

#[derive(serde::Serialize)]
struct SengridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(EmailClient {
            http_client,
            base_url,
            sender,
            api_key,
        })
    }
}

#[async_trait]
impl Notifier for EmailClient {
    #[tracing::instrument(
        name = "Sending an email through the mail API",
        skip(self, html_content, text_content),
        fields(recipient = %recipient)
    )]
    async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), NotifierError> {
        let url = format!("{}/mail/send", self.base_url);
        let body = SendEmailBody {
            from: SengridEmail {
                email: String::from(self.sender.as_ref()),
            },
            personalizations: vec![SengridPersonalization {
                to: vec![SengridEmail {
                    email: String::from(recipient.as_ref()),
                }],
            }],
            subject: String::from(subject),
            // The mail API wants text/plain listed before text/html.
            content: vec![
                SengridContent {
                    content_type: String::from("text/plain"),
                    value: String::from(text_content),
                },
                SengridContent {
                    content_type: String::from("text/html"),
                    value: String::from(html_content),
                },
            ],
        };

        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?;

        // 4xx means the payload or the sender was refused, keep the reason for the logs
        if response.status().is_client_error() {
            let status = response.status();
            let reason = response.text().await.unwrap_or_default();

            return Err(NotifierError::Rejected(format!("{} {}", status, reason)));
        }

        response.error_for_status()?;

        Ok(())
    }
}
