//! Snowtooth resort service binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`SNOWTOOTH_CONFIG`, default `snowtooth.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Load lift and trail seed data
//! 4. Build the activity provider
//! 5. Wire the resort context and serve HTTP until `Ctrl-C`

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use snowtooth_api::AppState;
use snowtooth_core::config::{DEFAULT_CONFIG_FILE, SnowtoothConfig};
use snowtooth_core::{ActivitySource, Resort, Seed};
use snowtooth_types::{LiftStatus, TrailStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerMainError;

/// Application entry point for the resort server.
///
/// # Errors
///
/// Returns an error if configuration, seed data, or the server fails.
#[tokio::main]
async fn main() -> Result<(), ServerMainError> {
    let config_path = std::env::var("SNOWTOOTH_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
    let config = SnowtoothConfig::load_or_default(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        host = config.server.host,
        port = config.server.port,
        "snowtooth starting"
    );

    let seed = match &config.data.dir {
        Some(dir) => Seed::load_from_dir(dir)?,
        None => {
            info!("No data directory configured, using bundled resort data");
            Seed::builtin()?
        }
    };
    let store = seed.into_store()?;
    info!(
        lifts = store.lifts().len(),
        lifts_open = store.lifts().count_by_status(LiftStatus::Open),
        trails = store.trails().len(),
        trails_open = store.trails().count_by_status(TrailStatus::Open),
        "Resort data loaded"
    );

    let activities = ActivitySource::from_config(&config.activities)?;
    info!(provider = activities.name(), "Activity provider ready");

    let resort = Resort::new(store, activities);
    let state = Arc::new(AppState::new(resort));

    snowtooth_api::start_server(&config.server, state).await?;

    info!("snowtooth stopped");
    Ok(())
}
