// Helpers that keep secret material out of logs and debug output.

/// Placeholder for a secret byte buffer; only the length is shown.
pub fn redact_bytes(bytes: &[u8]) -> String {
    format!("<redacted len={}>", bytes.len())
}

/// Placeholder for a secret phrase; only the word count is shown.
pub fn redact_phrase(phrase: &str) -> String {
    format!("<redacted words={}>", phrase.split_whitespace().count())
}
