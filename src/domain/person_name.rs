use unicode_segmentation::UnicodeSegmentation;

const MAX_CHAR_LENGHT: usize = 256;
const FORBIDDEN_CHARS: [char; 9] = ['/', '{', '}', '"', '>', '<', '\\', '(', ')'];

/// Name of whoever filled in a form: a contact, a booking client or a waiver signer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(name: String) -> Result<PersonName, String> {
        let is_empty_or_whitespace = name.trim().is_empty();
        let is_too_long = name.graphemes(true).count() > MAX_CHAR_LENGHT;
        let contains_forbidden_chars = name.chars().any(|char| FORBIDDEN_CHARS.contains(&char));
        // Names end up in email subjects, which must stay on a single line.
        let contains_control_chars = name.trim().chars().any(char::is_control);

        if is_empty_or_whitespace
            || is_too_long
            || contains_forbidden_chars
            || contains_control_chars
        {
            return Err(format!("{} is not a valid name", name));
        }

        Ok(Self(name.trim().to_string()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
