//! Input validation for chat messages.

use thiserror::Error;

/// Longest accepted message, in characters, counted before trimming.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Reasons a chat message is rejected before any assistant call.
///
/// The display text is shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Please enter a valid inquiry.")]
    Empty,

    #[error("Your inquiry is too long. Please keep it under 500 characters.")]
    TooLong { chars: usize },
}

/// Validate a raw message and return its trimmed form.
///
/// `None` covers both an absent message and a non-string value.
pub fn validate_message(message: Option<&str>) -> Result<&str, MessageError> {
    let raw = message.ok_or(MessageError::Empty)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MessageError::Empty);
    }
    let chars = raw.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(MessageError::TooLong { chars });
    }
    Ok(trimmed)
}
