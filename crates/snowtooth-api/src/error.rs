//! Error types for the resort API layer.
//!
//! [`ApiError`] unifies core, provider, and request failures into a single
//! enum that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snowtooth_core::{ActivityError, ResortError};
use snowtooth_types::ParseStatusError;

/// Errors that can occur in the resort API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A core query or mutation failed.
    #[error(transparent)]
    Resort(#[from] ResortError),

    /// The external activity provider failed.
    #[error(transparent)]
    Activity(#[from] ActivityError),

    /// A required query parameter was missing or malformed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The request body was not the expected JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl From<ParseStatusError> for ApiError {
    fn from(err: ParseStatusError) -> Self {
        Self::Resort(ResortError::InvalidEnum(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status code for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Resort(ResortError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Resort(ResortError::InvalidEnum(_))
            | Self::InvalidQuery(_)
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Activity(ActivityError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Activity(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowtooth_core::EntityKind;
    use snowtooth_types::LiftStatus;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(ResortError::not_found(EntityKind::Lift, "x"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_status_maps_to_400() {
        let err = ApiError::from("SIDEWAYS".parse::<LiftStatus>().unwrap_err());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_errors_are_gateway_failures() {
        assert_eq!(
            ApiError::from(ActivityError::NotConfigured).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(ActivityError::Http("timeout".to_owned())).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
