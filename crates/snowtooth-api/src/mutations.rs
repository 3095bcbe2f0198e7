//! Status mutation endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/lifts/{id}/status` | Set a lift's status |
//! | `POST` | `/api/trails/{id}/status` | Set a trail's status |
//!
//! The status literal is validated before the store is touched, so a bad
//! value never produces a partial write or a change event.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use snowtooth_types::{LiftId, LiftStatus, TrailId, TrailStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the set-status endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct SetStatusRequest {
    /// New status literal (e.g. `"HOLD"`).
    pub status: String,
}

/// Set a lift's status and return the updated lift.
pub async fn set_lift_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<SetStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let status: LiftStatus = body.status.parse()?;
    let lift = state
        .resort
        .mutations()
        .set_lift_status(&LiftId::new(id), status)
        .await?;
    Ok(Json(lift))
}

/// Set a trail's status and return the updated trail.
pub async fn set_trail_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<SetStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let status: TrailStatus = body.status.parse()?;
    let trail = state
        .resort
        .mutations()
        .set_trail_status(&TrailId::new(id), status)
        .await?;
    Ok(Json(trail))
}
