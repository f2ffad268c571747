use std::{collections::HashMap, sync::Arc};

use super::{
    error::IntakeError,
    templates::{self, EmailTemplate},
    validator::{self, FieldKind, FieldRule, Submission, ValidatedSubmission},
    verification::VerificationPolicy,
};
use crate::{
    captcha_client::BotScoreVerifier,
    domain::{
        email_address::EmailAddress, new_subscriber::NewSubscriber, subscriber::Subscriber,
        waiver::Waiver,
    },
    email_client::Notifier,
    store::SubscriptionStore,
};

/// Action name the booking form attaches to its captcha token.
pub const BOOKING_ACTION: &str = "submit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Nothing,
    InsertSubscriber,
    DeleteSubscriber,
    InsertWaiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The configured business inbox.
    Admin,
    /// Whoever filled in the form, taken from its `email` field.
    Submitter,
}

pub struct Notification {
    pub recipient: Recipient,
    pub template: &'static EmailTemplate,
}

#[derive(Debug, Clone, Copy)]
pub struct CaptchaStep {
    pub token_field: &'static str,
    pub expected_action: Option<&'static str>,
}

/// Static description of one public form.
pub struct IntakePipeline {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
    pub captcha: Option<CaptchaStep>,
    pub duplicate_guard: bool,
    pub persistence: Persistence,
    /// Sent in order, one after the other.
    pub notifications: &'static [Notification],
}

pub const CONTACT: IntakePipeline = IntakePipeline {
    name: "contact",
    rules: &[
        FieldRule::required("name", FieldKind::Name),
        FieldRule::required("email", FieldKind::Email),
        FieldRule::required("message", FieldKind::Text),
        FieldRule::required("recaptchaToken", FieldKind::Token),
    ],
    captcha: Some(CaptchaStep {
        token_field: "recaptchaToken",
        expected_action: None,
    }),
    duplicate_guard: false,
    persistence: Persistence::Nothing,
    notifications: &[Notification {
        recipient: Recipient::Admin,
        template: &templates::CONTACT_ADMIN,
    }],
};

pub const BOOKING_REQUEST: IntakePipeline = IntakePipeline {
    name: "booking_request",
    rules: &[
        FieldRule::required("name", FieldKind::Name),
        FieldRule::required("email", FieldKind::Email),
        FieldRule::required("phone", FieldKind::Phone),
        FieldRule::required("sessionType", FieldKind::Text),
        FieldRule::optional("message", FieldKind::Text),
        FieldRule::required("captchaToken", FieldKind::Token),
    ],
    captcha: Some(CaptchaStep {
        token_field: "captchaToken",
        expected_action: Some(BOOKING_ACTION),
    }),
    duplicate_guard: false,
    persistence: Persistence::Nothing,
    notifications: &[
        Notification {
            recipient: Recipient::Admin,
            template: &templates::BOOKING_ADMIN,
        },
        Notification {
            recipient: Recipient::Submitter,
            template: &templates::BOOKING_ACKNOWLEDGEMENT,
        },
    ],
};

pub const SUBSCRIBE: IntakePipeline = IntakePipeline {
    name: "subscribe",
    rules: &[FieldRule::required("email", FieldKind::Email)],
    captcha: None,
    duplicate_guard: true,
    persistence: Persistence::InsertSubscriber,
    notifications: &[Notification {
        recipient: Recipient::Submitter,
        template: &templates::SUBSCRIBE_WELCOME,
    }],
};

pub const UNSUBSCRIBE: IntakePipeline = IntakePipeline {
    name: "unsubscribe",
    rules: &[FieldRule::required("email", FieldKind::Email)],
    captcha: None,
    duplicate_guard: false,
    persistence: Persistence::DeleteSubscriber,
    notifications: &[],
};

pub const WAIVER_SIGNUP: IntakePipeline = IntakePipeline {
    name: "waiver_signup",
    rules: &[
        FieldRule::required("name", FieldKind::Name),
        FieldRule::required("email", FieldKind::Email),
        FieldRule::required("phone", FieldKind::Phone),
        FieldRule::required("classTitle", FieldKind::Text),
        FieldRule::required("date", FieldKind::Date),
        FieldRule::required("signature", FieldKind::Payload),
    ],
    captcha: None,
    duplicate_guard: false,
    persistence: Persistence::InsertWaiver,
    notifications: &[Notification {
        recipient: Recipient::Submitter,
        template: &templates::WAIVER_CONFIRMATION,
    }],
};

/// External collaborators every pipeline runs against.
pub struct IntakeServices {
    store: Arc<dyn SubscriptionStore>,
    verifier: Arc<dyn BotScoreVerifier>,
    notifier: Arc<dyn Notifier>,
    admin_recipient: EmailAddress,
    min_score: f64,
    site_url: String,
}

impl IntakeServices {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        verifier: Arc<dyn BotScoreVerifier>,
        notifier: Arc<dyn Notifier>,
        admin_recipient: EmailAddress,
        min_score: f64,
        site_url: String,
    ) -> Self {
        IntakeServices {
            store,
            verifier,
            notifier,
            admin_recipient,
            min_score,
            site_url,
        }
    }

    /// Runs every step of `pipeline` over `submission`.
    ///
    /// A failure after the store step leaves the stored state in place, so an
    /// `Err` does not mean nothing was written.
    #[tracing::instrument(
        name = "Running an intake pipeline",
        skip(self, pipeline, submission),
        fields(pipeline = pipeline.name)
    )]
    pub async fn run(
        &self,
        pipeline: &IntakePipeline,
        submission: Submission,
    ) -> Result<ValidatedSubmission, IntakeError> {
        let submission = validator::validate(pipeline.rules, &submission).map_err(|err| {
            tracing::warn!("Validation error: {:?}", err);
            err
        })?;

        if let Some(step) = &pipeline.captcha {
            self.verify_token(step, &submission).await?;
        }

        if pipeline.duplicate_guard {
            self.guard_duplicate(&submission).await?;
        }

        self.persist(pipeline.persistence, &submission).await?;
        self.notify(pipeline.notifications, &submission).await?;

        Ok(submission)
    }

    #[tracing::instrument(name = "Verifying the captcha token", skip(self, submission))]
    async fn verify_token(
        &self,
        step: &CaptchaStep,
        submission: &ValidatedSubmission,
    ) -> Result<(), IntakeError> {
        let token = submission
            .get(step.token_field)
            .ok_or(IntakeError::MissingToken)?;

        let outcome = self.verifier.verify(token).await.map_err(|err| {
            tracing::error!("Captcha verification request failed: {:?}", err);
            err
        })?;

        let policy = VerificationPolicy {
            min_score: self.min_score,
            expected_action: step.expected_action,
        };

        policy.evaluate(&outcome).map_err(|rejection| {
            tracing::warn!(
                error_codes = ?outcome.error_codes,
                "Captcha rejected: {}",
                rejection
            );
            rejection
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Checking for an existing subscriber", skip(self, submission))]
    async fn guard_duplicate(&self, submission: &ValidatedSubmission) -> Result<(), IntakeError> {
        let new_subscriber =
            NewSubscriber::try_from(submission).map_err(IntakeError::InvalidRecord)?;

        if self
            .store
            .find_subscriber(&new_subscriber.email)
            .await?
            .is_some()
        {
            tracing::info!("{} is already subscribed", new_subscriber.email);
            return Err(IntakeError::Conflict);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Persisting the submission", skip(self, submission))]
    async fn persist(
        &self,
        persistence: Persistence,
        submission: &ValidatedSubmission,
    ) -> Result<(), IntakeError> {
        match persistence {
            Persistence::Nothing => {}
            Persistence::InsertSubscriber => {
                let new_subscriber =
                    NewSubscriber::try_from(submission).map_err(IntakeError::InvalidRecord)?;

                self.store
                    .insert_subscriber(&Subscriber::new(new_subscriber.email))
                    .await?;
            }
            Persistence::DeleteSubscriber => {
                let subscriber =
                    NewSubscriber::try_from(submission).map_err(IntakeError::InvalidRecord)?;
                let removed = self.store.delete_subscriber(&subscriber.email).await?;

                tracing::info!(removed, "Unsubscribed {}", subscriber.email);
            }
            Persistence::InsertWaiver => {
                let waiver = Waiver::try_from(submission).map_err(IntakeError::InvalidRecord)?;

                self.store.insert_waiver(&waiver).await?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(name = "Sending notification emails", skip_all)]
    async fn notify(
        &self,
        notifications: &[Notification],
        submission: &ValidatedSubmission,
    ) -> Result<(), IntakeError> {
        let values: HashMap<&str, &str> = submission
            .iter()
            .chain(std::iter::once(("siteUrl", self.site_url.as_str())))
            .collect();

        for notification in notifications {
            let recipient = match notification.recipient {
                Recipient::Admin => self.admin_recipient.clone(),
                Recipient::Submitter => submission
                    .require("email")
                    .and_then(EmailAddress::parse)
                    .map_err(IntakeError::InvalidRecord)?,
            };
            let email = notification.template.render(&values);

            self.notifier
                .send_email(&recipient, &email.subject, &email.html, &email.text)
                .await
                .map_err(|err| {
                    tracing::error!("Failed to send an email to {}: {:?}", recipient, err);
                    err
                })?;
        }

        Ok(())
    }
}
