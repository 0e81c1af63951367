//! Reply extraction from a thread listing.

use crate::assistant::{Role, ThreadMessage};

/// Text of the most recent assistant turn, if it has any non-blank text.
///
/// Recency is decided by `created_at`; on a tie the earlier entry in the
/// listing wins, since listings are requested newest first.
pub fn latest_assistant_text(messages: &[ThreadMessage]) -> Option<String> {
    let latest = messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .fold(None::<&ThreadMessage>, |best, m| match best {
            Some(b) if b.created_at >= m.created_at => Some(b),
            _ => Some(m),
        })?;

    let text = latest.content.to_text();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
