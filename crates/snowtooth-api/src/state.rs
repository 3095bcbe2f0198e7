//! Shared application state for the resort API server.
//!
//! [`AppState`] wraps the [`Resort`] context that every handler reads from
//! and writes through. It is wrapped in an [`Arc`](std::sync::Arc) and
//! injected via Axum's `State` extractor.

use snowtooth_core::Resort;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The resort context (store, bus, query and mutation facades).
    pub resort: Resort,
}

impl AppState {
    /// Create application state around an already-seeded resort.
    pub const fn new(resort: Resort) -> Self {
        Self { resort }
    }
}
