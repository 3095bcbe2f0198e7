//! Error types for the resort server binary.

/// Top-level error for the resort server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerMainError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: snowtooth_core::config::ConfigError,
    },

    /// Seed data could not be loaded or indexed.
    #[error("seed error: {source}")]
    Seed {
        /// The underlying seed error.
        #[from]
        source: snowtooth_core::SeedError,
    },

    /// The activity provider could not be built.
    #[error("activity provider error: {source}")]
    Activity {
        /// The underlying provider error.
        #[from]
        source: snowtooth_core::ActivityError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: snowtooth_api::ServerError,
    },
}
