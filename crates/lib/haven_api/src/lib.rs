//! # haven_api
//!
//! HTTP API library for Haven.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use haven_core::relay::ChatRelay;
use haven_core::store::DocumentStore;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{chat, forms, health, rooms};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat relay with its injected assistant client.
    pub relay: ChatRelay,
    /// Document store for form submissions and room availability.
    pub store: Arc<dyn DocumentStore>,
    /// API configuration.
    pub config: ApiConfig,
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            warn!(allowed_origin, "invalid CORS origin, cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}

/// Turns a handler panic into the generic 500 JSON body.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(format!("panic: {detail}")).into_response()
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/chat", post(chat::chat_handler))
        .route("/api/inquiries", post(forms::create_inquiry))
        .route("/api/reservations", post(forms::create_reservation))
        .route("/api/rooms", get(rooms::list_rooms))
        .route("/api/rooms/{room}/suggestions", get(rooms::room_suggestions))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .with_state(state)
}
