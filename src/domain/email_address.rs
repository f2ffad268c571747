use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Addresses are stored lowercased so `A@B.com` and `a@b.com` are the same subscriber.
    pub fn parse(email: String) -> Result<EmailAddress, String> {
        let email = email.trim().to_lowercase();

        if !validate_email(&email) {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
