use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::email_address::EmailAddress;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: EmailAddress,
    pub subscribed_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: EmailAddress) -> Self {
        Subscriber {
            id: Uuid::new_v4(),
            email,
            subscribed_at: Utc::now(),
        }
    }
}
