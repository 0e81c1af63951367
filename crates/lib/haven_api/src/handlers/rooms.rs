//! Room availability endpoints.

use axum::Json;
use axum::extract::{Path, State};

use haven_core::models::rooms::{RoomSnapshot, RoomSuggestions};
use haven_core::rooms;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `GET /api/rooms` — the current availability snapshot.
pub async fn list_rooms(State(state): State<AppState>) -> AppResult<Json<RoomSnapshot>> {
    let snapshot = rooms::load_snapshot(state.store.as_ref()).await?;
    Ok(Json(snapshot))
}

/// `GET /api/rooms/{room}/suggestions` — available rooms on the same side.
pub async fn room_suggestions(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> AppResult<Json<RoomSuggestions>> {
    let snapshot = rooms::load_snapshot(state.store.as_ref()).await?;
    rooms::suggest_alternatives(&snapshot, &room)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unable to determine the side for room {room}")))
}
