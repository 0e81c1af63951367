// @awa-component: DOC-FormIntake
//
//! Inquiry and reservation intake.
//!
//! Submissions are validated, stamped with a server-side timestamp, and
//! written once to their collection. Nothing here updates or deletes.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::forms::{Inquiry, Reservation};
use crate::store::{DocumentStore, StoreError};

pub const INQUIRIES_COLLECTION: &str = "inquiries";
pub const RESERVATIONS_COLLECTION: &str = "reservationForm";

/// Form submission errors. Validation variants carry user-facing text.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Please fill in all required fields.")]
    MissingInquiryFields,

    #[error("Please fill in all fields.")]
    MissingReservationFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("You must agree to the Terms & Conditions.")]
    TermsNotAccepted,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Raw inquiry form as posted by the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl InquiryForm {
    pub fn validate(self, now: DateTime<Utc>) -> Result<Inquiry, FormError> {
        if [&self.name, &self.email, &self.phone, &self.message]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(FormError::MissingInquiryFields);
        }
        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(Inquiry {
            full_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
            created_at: now,
        })
    }
}

/// Raw reservation form as posted by the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReservationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tenants: Option<u32>,
    pub room: String,
    pub agreed: bool,
}

impl ReservationForm {
    pub fn validate(self, now: DateTime<Utc>) -> Result<Reservation, FormError> {
        if !self.agreed {
            return Err(FormError::TermsNotAccepted);
        }
        let tenants = match self.tenants {
            Some(n) if n > 0 => n,
            _ => return Err(FormError::MissingReservationFields),
        };
        if [&self.name, &self.email, &self.phone, &self.address, &self.room]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(FormError::MissingReservationFields);
        }
        Ok(Reservation {
            full_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            tenants,
            room: self.room.trim().to_string(),
            agreed_to_terms: true,
            created_at: now,
        })
    }
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Loose email shape check: some `x@y.z` run without whitespace.
pub fn looks_like_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

/// Validate and store an inquiry. Returns the new document id.
pub async fn submit_inquiry(
    store: &dyn DocumentStore,
    form: InquiryForm,
) -> Result<String, FormError> {
    let inquiry = form.validate(Utc::now())?;
    let id = store
        .create_document(INQUIRIES_COLLECTION, serde_json::to_value(&inquiry).map_err(StoreError::from)?)
        .await?;
    info!(id = %id, "inquiry stored");
    Ok(id)
}

/// Validate and store a reservation. Returns the new document id.
pub async fn submit_reservation(
    store: &dyn DocumentStore,
    form: ReservationForm,
) -> Result<String, FormError> {
    let reservation = form.validate(Utc::now())?;
    let room = reservation.room.clone();
    let id = store
        .create_document(
            RESERVATIONS_COLLECTION,
            serde_json::to_value(&reservation).map_err(StoreError::from)?,
        )
        .await?;
    info!(id = %id, room = %room, "reservation stored");
    Ok(id)
}
