use crate::domain::verification::VerificationOutcome;

/// Minimum captcha score accepted when the configuration does not set one.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("Captcha verification failed.")]
    Failed,
    #[error("Captcha score {score} is below the minimum of {min_score}.")]
    LowScore { score: f64, min_score: f64 },
    #[error("Captcha action '{actual}' does not match '{expected}'.")]
    ActionMismatch { expected: String, actual: String },
}

/// Pass/fail gate applied to a single verification outcome.
#[derive(Debug, Clone)]
pub struct VerificationPolicy<'a> {
    pub min_score: f64,
    pub expected_action: Option<&'a str>,
}

impl VerificationPolicy<'_> {
    pub fn evaluate(&self, outcome: &VerificationOutcome) -> Result<(), Rejection> {
        if outcome.score < self.min_score {
            return Err(Rejection::LowScore {
                score: outcome.score,
                min_score: self.min_score,
            });
        }

        if !outcome.success {
            return Err(Rejection::Failed);
        }

        match self.expected_action {
            Some(expected) if expected != outcome.action => Err(Rejection::ActionMismatch {
                expected: expected.to_string(),
                actual: outcome.action.clone(),
            }),
            _ => Ok(()),
        }
    }
}
