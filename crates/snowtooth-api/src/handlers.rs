//! Read-only REST endpoint handlers for the resort API.
//!
//! All handlers go through the shared [`Resort`](snowtooth_core::Resort)
//! query facade, so every response reflects the current store.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/lifts` | List lifts (`?status=` optional) |
//! | `GET` | `/api/counts/lifts` | Count lifts (`?status=` required) |
//! | `GET` | `/api/lifts/{id}` | Single lift with `trailAccess` |
//! | `GET` | `/api/trails` | List trails (`?status=` optional) |
//! | `GET` | `/api/counts/trails` | Count trails (`?status=` required) |
//! | `GET` | `/api/trails/{id}` | Single trail with `accessedByLifts` |
//! | `GET` | `/api/activities` | Activities from the external provider |

use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use snowtooth_types::{LiftId, LiftStatus, ParseStatusError, TrailId, TrailStatus};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters accepted by list and count endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct StatusQuery {
    /// Status literal. Optional for lists, required for counts.
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with lift and trail counts and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let queries = state.resort.queries();
    let lifts_open = queries.count_lifts(LiftStatus::Open).await;
    let lifts_hold = queries.count_lifts(LiftStatus::Hold).await;
    let lifts_total = queries.list_lifts(None).await.len();
    let trails_open = queries.count_trails(TrailStatus::Open).await;
    let trails_total = queries.list_trails(None).await.len();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Snowtooth Mountain</title>
    <style>
        body {{ font-family: monospace; padding: 2rem; max-width: 720px; margin: 0 auto; }}
        .metric {{ display: inline-block; border: 1px solid #ccc; padding: 1rem; margin: 0.5rem 0.5rem 0.5rem 0; }}
        li::before {{ content: "GET "; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Snowtooth Mountain</h1>
    <div>
        <div class="metric">Lifts open: {lifts_open} / {lifts_total}</div>
        <div class="metric">Lifts on hold: {lifts_hold}</div>
        <div class="metric">Trails open: {trails_open} / {trails_total}</div>
    </div>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/lifts">/api/lifts</a> -- List lifts (?status=OPEN|HOLD|CLOSED)</li>
        <li><a href="/api/counts/lifts?status=OPEN">/api/counts/lifts?status=OPEN</a> -- Count lifts</li>
        <li><a href="/api/trails">/api/trails</a> -- List trails (?status=OPEN|CLOSED)</li>
        <li><a href="/api/counts/trails?status=OPEN">/api/counts/trails?status=OPEN</a> -- Count trails</li>
        <li><a href="/api/activities">/api/activities</a> -- My activities</li>
    </ul>

    <h2>WebSocket</h2>
    <p><code>ws://host:port/ws/lifts</code> and <code>ws://host:port/ws/trails</code> -- Live status changes</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Lifts
// ---------------------------------------------------------------------------

/// List lifts, optionally filtered by exact status.
pub async fn list_lifts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = optional_status::<LiftStatus>(params.status.as_deref())?;
    let lifts = state.resort.queries().list_lifts(status).await;

    Ok(Json(serde_json::json!({
        "count": lifts.len(),
        "lifts": lifts,
    })))
}

/// Count lifts with exactly the given status.
pub async fn count_lifts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = required_status::<LiftStatus>(params.status.as_deref())?;
    let count = state.resort.queries().count_lifts(status).await;

    Ok(Json(serde_json::json!({
        "status": status,
        "count": count,
    })))
}

/// Return a single lift with its resolved `trailAccess`.
pub async fn get_lift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.resort.queries().lift_view(&LiftId::new(id)).await?;
    Ok(Json(view))
}

// ---------------------------------------------------------------------------
// Trails
// ---------------------------------------------------------------------------

/// List trails, optionally filtered by exact status.
pub async fn list_trails(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = optional_status::<TrailStatus>(params.status.as_deref())?;
    let trails = state.resort.queries().list_trails(status).await;

    Ok(Json(serde_json::json!({
        "count": trails.len(),
        "trails": trails,
    })))
}

/// Count trails with exactly the given status.
pub async fn count_trails(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = required_status::<TrailStatus>(params.status.as_deref())?;
    let count = state.resort.queries().count_trails(status).await;

    Ok(Json(serde_json::json!({
        "status": status,
        "count": count,
    })))
}

/// Return a single trail with its resolved `accessedByLifts`.
pub async fn get_trail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.resort.queries().trail_view(&TrailId::new(id)).await?;
    Ok(Json(view))
}

// ---------------------------------------------------------------------------
// GET /api/activities
// ---------------------------------------------------------------------------

/// List activities from the external provider.
pub async fn my_activities(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = state.resort.queries().my_activities().await?;

    Ok(Json(serde_json::json!({
        "count": activities.len(),
        "activities": activities,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an optional status parameter. Absent or empty means no filter.
pub(crate) fn optional_status<S>(raw: Option<&str>) -> Result<Option<S>, ApiError>
where
    S: FromStr<Err = ParseStatusError>,
{
    raw.filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
        .map_err(ApiError::from)
}

/// Parse a mandatory status parameter.
pub(crate) fn required_status<S>(raw: Option<&str>) -> Result<S, ApiError>
where
    S: FromStr<Err = ParseStatusError>,
{
    optional_status(raw)?
        .ok_or_else(|| ApiError::InvalidQuery("`status` parameter is required".to_owned()))
}
