//! Inquiry and reservation intake endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::debug;

use haven_core::forms::{self, InquiryForm, ReservationForm};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::CreatedResponse;

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("rejected form body: {rejection}");
        AppError::Validation(rejection.body_text())
    })
}

/// `POST /api/inquiries` — store an inquiry.
pub async fn create_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquiryForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let form = decode(payload)?;
    let id = forms::submit_inquiry(state.store.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// `POST /api/reservations` — store a reservation.
pub async fn create_reservation(
    State(state): State<AppState>,
    payload: Result<Json<ReservationForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let form = decode(payload)?;
    let id = forms::submit_reservation(state.store.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
