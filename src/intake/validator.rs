use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{
    email_address::EmailAddress, person_name::PersonName, phone_number::PhoneNumber,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_TEXT_LENGTH: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    /// Free text such as a message or a session type.
    Text,
    Date,
    /// Opaque blob, only checked for presence.
    Payload,
    Token,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            name,
            kind,
            required: false,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self.kind {
            FieldKind::Name => PersonName::parse(value.to_string()).is_ok(),
            FieldKind::Email => EmailAddress::parse(value.to_string()).is_ok(),
            FieldKind::Phone => PhoneNumber::parse(value.to_string()).is_ok(),
            FieldKind::Text => value.graphemes(true).count() <= MAX_TEXT_LENGTH,
            FieldKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok(),
            FieldKind::Payload | FieldKind::Token => true,
        }
    }
}

/// Form fields exactly as they arrived in the request body.
#[derive(Debug, Default, Clone)]
pub struct Submission(Map<String, Value>);

impl From<Map<String, Value>> for Submission {
    fn from(fields: Map<String, Value>) -> Self {
        Submission(fields)
    }
}

impl Submission {
    fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("Invalid submission (missing: {missing:?}, malformed: {malformed:?})")]
pub struct ValidationError {
    pub missing: Vec<String>,
    pub malformed: Vec<String>,
}

/// Field values that passed every rule of a pipeline, trimmed.
#[derive(Debug, Clone, Default)]
pub struct ValidatedSubmission {
    values: BTreeMap<String, String>,
}

impl ValidatedSubmission {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn require(&self, field: &str) -> Result<String, String> {
        self.get(field)
            .map(String::from)
            .ok_or_else(|| format!("{} is missing from the submission", field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Checks `submission` against `rules`. Fields the rules don't mention are dropped.
pub fn validate(
    rules: &[FieldRule],
    submission: &Submission,
) -> Result<ValidatedSubmission, ValidationError> {
    let mut validated = ValidatedSubmission::default();
    let mut error = ValidationError::default();

    for rule in rules {
        let value = match submission.field(rule.name) {
            None => None,
            Some(Value::String(value)) if value.trim().is_empty() => None,
            Some(Value::String(value)) => Some(value.trim()),
            Some(_) => {
                error.malformed.push(rule.name.to_string());
                continue;
            }
        };

        match value {
            None if rule.required => error.missing.push(rule.name.to_string()),
            None => {}
            Some(value) if !rule.accepts(value) => error.malformed.push(rule.name.to_string()),
            Some(value) => {
                validated
                    .values
                    .insert(rule.name.to_string(), value.to_string());
            }
        }
    }

    if error.missing.is_empty() && error.malformed.is_empty() {
        Ok(validated)
    } else {
        Err(error)
    }
}
