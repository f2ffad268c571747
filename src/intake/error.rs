use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use super::{validator::ValidationError, verification::Rejection};
use crate::{captcha_client::VerifierError, email_client::NotifierError, store::StoreError};

#[derive(thiserror::Error)]
pub enum IntakeError {
    #[error("Some fields are missing or invalid.")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidRecord(String),
    #[error("Missing captcha token.")]
    MissingToken,
    #[error("Captcha verification failed.")]
    Rejected(#[from] Rejection),
    #[error("This email is already subscribed.")]
    Conflict,
    #[error("Failed to verify the captcha token.")]
    Verifier(#[from] VerifierError),
    #[error("Failed to store the submission.")]
    Store(#[source] StoreError),
    #[error("Failed to send a notification email.")]
    Notify(#[from] NotifierError),
}

// A duplicate key from the store means someone else won the insert race.
impl From<StoreError> for IntakeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => IntakeError::Conflict,
            err => IntakeError::Store(err),
        }
    }
}

impl std::fmt::Debug for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::error_chain_fmt(self, f)
    }
}

impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::Validation(_)
            | IntakeError::InvalidRecord(_)
            | IntakeError::MissingToken
            | IntakeError::Rejected(_) => StatusCode::BAD_REQUEST,
            IntakeError::Conflict => StatusCode::CONFLICT,
            IntakeError::Verifier(_) | IntakeError::Store(_) | IntakeError::Notify(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            IntakeError::Validation(err) => json!({
                "error": self.to_string(),
                "missing": err.missing,
                "malformed": err.malformed,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
