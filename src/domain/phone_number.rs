const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;
const ALLOWED_SEPARATORS: [char; 6] = [' ', '+', '-', '(', ')', '.'];

#[derive(Debug, Clone, serde::Serialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(phone: String) -> Result<PhoneNumber, String> {
        let phone = phone.trim().to_string();
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let has_unknown_chars = phone
            .chars()
            .any(|char| !char.is_ascii_digit() && !ALLOWED_SEPARATORS.contains(&char));

        if has_unknown_chars || !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(format!("{} is not a valid phone number", phone));
        }

        Ok(Self(phone))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
