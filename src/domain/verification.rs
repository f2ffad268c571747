/// What the bot-score service said about a single token. Never persisted.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub action: String,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}
