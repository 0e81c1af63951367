//! Domain models.
//!
//! Stored documents keep the field names the site has always written
//! (`fullName`, `phoneNo`, ...), hence the explicit serde renames.

pub mod chat;
pub mod forms;
pub mod rooms;
