use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_MESSAGE_LENGTH;
use crate::shared::validation::char_len;

/// Checks a message body and returns it trimmed.
///
/// Blank bodies are rejected first. The length limit applies to the body
/// as submitted, counted in characters.
pub fn validate_message_body(body: &str) -> Result<&str> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Message cannot be empty.".to_string()));
    }

    if char_len(body) > MAX_MESSAGE_LENGTH {
        return Err(AppError::Validation(format!(
            "Message too long (max {} characters)",
            MAX_MESSAGE_LENGTH
        )));
    }

    Ok(trimmed)
}
