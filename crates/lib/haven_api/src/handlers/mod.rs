//! Request handlers.

pub mod chat;
pub mod forms;
pub mod health;
pub mod rooms;
