//! Shared type definitions for the Snowtooth resort service.
//!
//! This crate is the single source of truth for the entities served by the
//! resort API: lifts, trails, and the read-only activities pulled from an
//! external provider.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for entity identifiers
//! - [`enums`] -- Lift and trail status enumerations
//! - [`structs`] -- Entity records as loaded from the seed data

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{LiftStatus, ParseStatusError, TrailStatus};
pub use ids::{ActivityId, LiftId, TrailId};
pub use structs::{Activity, Lift, Trail};
