//! # haven_core
//!
//! Core domain logic for Haven: the assistant chat relay, the assistant
//! client, document storage, form intake, and room availability.

pub mod assistant;
pub mod forms;
pub mod models;
pub mod relay;
pub mod rooms;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
