//! The validate → verify → guard → store → notify chain shared by every public form.
//!
//! Each endpoint is described by an [`IntakePipeline`] constant and executed by
//! [`IntakeServices::run`], which owns the injected store, captcha verifier and
//! mailer. Steps run strictly one after the other and the first failing step
//! ends the request.

pub mod error;
pub mod pipeline;
pub mod templates;
pub mod validator;
pub mod verification;

pub use error::IntakeError;
pub use pipeline::{
    CaptchaStep, IntakePipeline, IntakeServices, Notification, Persistence, Recipient,
    BOOKING_REQUEST, CONTACT, SUBSCRIBE, UNSUBSCRIBE, WAIVER_SIGNUP,
};
pub use validator::{FieldKind, FieldRule, Submission, ValidatedSubmission};
pub use verification::DEFAULT_MIN_SCORE;
