//! HTTP API: axum router, shared state and handlers.

pub mod error;
pub mod routes;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rates::RateProvider;
use error::ErrorBody;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateProvider>,
}

impl AppState {
    pub fn new(rates: RateProvider) -> Self {
        AppState {
            rates: Arc::new(rates),
        }
    }
}

/// Creates the application router, with every route under `/api`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };
    tracing::error!(error = %message, "Handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(message))).into_response()
}
