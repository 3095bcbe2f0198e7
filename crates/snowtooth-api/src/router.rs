//! Axum router construction for the resort API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, mutations, ws};

/// Build the complete Axum router for the resort server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/lifts`, `/api/lifts/{id}`
/// - `POST /api/lifts/{id}/status`
/// - `GET /api/trails`, `/api/trails/{id}`
/// - `POST /api/trails/{id}/status`
/// - `GET /api/counts/lifts`, `/api/counts/trails`
///
/// Counts live outside `/api/lifts` and `/api/trails` so every entity id,
/// including `count`, reaches the `{id}` routes.
/// - `GET /api/activities`
/// - `GET /ws/lifts`, `/ws/trails` -- live status-change streams
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/lifts", get(ws::ws_lifts))
        .route("/ws/trails", get(ws::ws_trails))
        // Lifts
        .route("/api/lifts", get(handlers::list_lifts))
        .route("/api/lifts/{id}", get(handlers::get_lift))
        .route("/api/lifts/{id}/status", post(mutations::set_lift_status))
        // Trails
        .route("/api/trails", get(handlers::list_trails))
        // Counts
        .route("/api/counts/lifts", get(handlers::count_lifts))
        .route("/api/counts/trails", get(handlers::count_trails))
        .route("/api/trails/{id}", get(handlers::get_trail))
        .route("/api/trails/{id}/status", post(mutations::set_trail_status))
        // External provider
        .route("/api/activities", get(handlers::my_activities))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
