//! Resolution engine for the Snowtooth resort service.
//!
//! This crate owns the behavior behind every resort operation:
//!
//! - [`store`] -- in-memory lift and trail collections
//! - [`resolver`] -- tolerant lift/trail cross-reference resolution
//! - [`mutation`] -- status changes and change-event emission
//! - [`bus`] -- topic-based publish/subscribe fan-out
//! - [`query`] -- list, get, and count operations
//! - [`resort`] -- the shared context that wires them together
//!
//! Supporting modules load the [`seed`] data, read [`config`], and talk to
//! the external [`activity`] provider.
//!
//! # Architecture
//!
//! ```text
//! caller --> QueryFacade --> EntityStore <-- MutationEngine --> EventBus --> StatusStream
//!                 |                                                              |
//!                 +--> resolver                                         one channel per subscriber
//! ```
//!
//! Reads always see the current store; there is no cache. A mutation
//! publishes its change while still holding the store's write lock, so
//! subscribers see changes in write order, then returns the updated
//! entity.

pub mod activity;
pub mod bus;
pub mod config;
pub mod entity;
pub mod error;
pub mod mutation;
pub mod query;
pub mod resolver;
pub mod resort;
pub mod seed;
pub mod store;

// Re-export primary types for convenience.
pub use activity::{ActivityError, ActivitySource};
pub use bus::{EventBus, Subscription, Topic};
pub use config::SnowtoothConfig;
pub use entity::{Entity, StatusChange};
pub use error::{EntityKind, ResortError, SeedError, StoreError};
pub use mutation::MutationEngine;
pub use query::{LiftView, QueryFacade, TrailView};
pub use resort::{Resort, StatusStream};
pub use seed::Seed;
pub use store::{EntityStore, SharedStore};
