//! HTTP and `WebSocket` boundary for the Snowtooth resort service.
//!
//! This crate exposes the [`Resort`](snowtooth_core::Resort) operations
//! over Axum:
//!
//! - **REST reads** for lifts, trails, counts, and activities
//! - **REST mutations** (`POST /api/{lifts,trails}/{id}/status`)
//! - **`WebSocket` streams** (`/ws/lifts`, `/ws/trails`) that forward
//!   status changes to connected clients
//! - **Minimal HTML page** (`GET /`) with live counts
//!
//! Status literals are parsed at this boundary; an unknown literal is
//! rejected with `400` before any store access.

pub mod error;
pub mod handlers;
pub mod mutations;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
