use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    email_address::EmailAddress, person_name::PersonName, phone_number::PhoneNumber,
};
use crate::intake::validator::{ValidatedSubmission, DATE_FORMAT};

/// A signed class waiver. Written once when a booking is confirmed and never updated.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Waiver {
    pub id: Uuid,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub class_title: String,
    pub date: NaiveDate,
    /// Signature image exactly as the browser sent it (usually a data URL).
    pub signature: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&ValidatedSubmission> for Waiver {
    type Error = String;

    fn try_from(submission: &ValidatedSubmission) -> Result<Self, Self::Error> {
        let date = submission.require("date")?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|err| format!("{} is not a valid date: {}", date, err))?;

        Ok(Waiver {
            id: Uuid::new_v4(),
            name: PersonName::parse(submission.require("name")?)?,
            email: EmailAddress::parse(submission.require("email")?)?,
            phone: PhoneNumber::parse(submission.require("phone")?)?,
            class_title: submission.require("classTitle")?,
            date,
            signature: submission.require("signature")?,
            created_at: Utc::now(),
        })
    }
}
