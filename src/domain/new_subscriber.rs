use crate::domain::email_address::EmailAddress;
use crate::intake::validator::ValidatedSubmission;

pub struct NewSubscriber {
    pub email: EmailAddress,
}

impl TryFrom<&ValidatedSubmission> for NewSubscriber {
    type Error = String;

    fn try_from(submission: &ValidatedSubmission) -> Result<Self, Self::Error> {
        let email = EmailAddress::parse(submission.require("email")?)?;

        Ok(NewSubscriber { email })
    }
}
