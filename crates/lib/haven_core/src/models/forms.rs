//! Inquiry and reservation documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A general inquiry, stored in the `inquiries` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "phoneNo")]
    pub phone: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A room reservation, stored in the `reservationForm` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "phoneNo")]
    pub phone: String,
    pub address: String,
    #[serde(rename = "tenantsNo")]
    pub tenants: u32,
    pub room: String,
    #[serde(rename = "agreedToTerms")]
    pub agreed_to_terms: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
