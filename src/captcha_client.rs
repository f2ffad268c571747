use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::verification::VerificationOutcome;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(5);

#[derive(thiserror::Error)]
pub enum VerifierError {
    #[error("Failed to reach the bot-score service.")]
    Request(#[from] reqwest::Error),
    #[error("The bot-score service answered with an unusable outcome: {0}")]
    Unexpected(String),
}

impl std::fmt::Debug for VerifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::error_chain_fmt(self, f)
    }
}

/// Scores a client token with an external bot-detection service.
#[async_trait]
pub trait BotScoreVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerificationOutcome, VerifierError>;
}

/// reCAPTCHA v3 `siteverify` client.
pub struct CaptchaClient {
    http_client: Client,
    base_url: String,
    secret_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct SiteVerifyForm<'a> {
    secret: &'a str,
    response: &'a str,
}

impl CaptchaClient {
    pub fn new(
        base_url: String,
        secret_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<CaptchaClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(CaptchaClient {
            http_client,
            base_url,
            secret_key,
        })
    }
}

#[async_trait]
impl BotScoreVerifier for CaptchaClient {
    #[tracing::instrument(name = "Scoring a captcha token", skip(self, token))]
    async fn verify(&self, token: &str) -> Result<VerificationOutcome, VerifierError> {
        let url = format!("{}/recaptcha/api/siteverify", self.base_url);
        let form = SiteVerifyForm {
            secret: self.secret_key.expose_secret(),
            response: token,
        };

        let outcome = self
            .http_client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json::<VerificationOutcome>()
            .await?;

        if !(0.0..=1.0).contains(&outcome.score) {
            return Err(VerifierError::Unexpected(format!(
                "score {} is outside [0, 1]",
                outcome.score
            )));
        }

        tracing::info!(
            success = outcome.success,
            score = outcome.score,
            action = %outcome.action,
            "Captcha token scored"
        );

        Ok(outcome)
    }
}
