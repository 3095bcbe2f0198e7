//! Initial lift and trail collections.
//!
//! The store is populated once at startup, either from a directory
//! containing `lifts.json` and `trails.json` or from the Snowtooth
//! Mountain data compiled into the binary.

use std::path::Path;

use snowtooth_types::{Lift, Trail};
use tracing::info;

use crate::error::SeedError;
use crate::store::EntityStore;

/// File name of the lift collection inside a data directory.
pub const LIFTS_FILE: &str = "lifts.json";

/// File name of the trail collection inside a data directory.
pub const TRAILS_FILE: &str = "trails.json";

const BUILTIN_LIFTS: &str = include_str!("../data/lifts.json");
const BUILTIN_TRAILS: &str = include_str!("../data/trails.json");

/// Decoded seed collections, not yet indexed.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    /// Lifts in file order.
    pub lifts: Vec<Lift>,
    /// Trails in file order.
    pub trails: Vec<Trail>,
}

impl Seed {
    /// The bundled Snowtooth Mountain data.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_LIFTS, BUILTIN_TRAILS)
    }

    /// Decode seed collections from JSON arrays.
    pub fn from_json(lifts: &str, trails: &str) -> Result<Self, SeedError> {
        let lifts = serde_json::from_str(lifts).map_err(|source| SeedError::Json {
            file: LIFTS_FILE.to_owned(),
            source,
        })?;
        let trails = serde_json::from_str(trails).map_err(|source| SeedError::Json {
            file: TRAILS_FILE.to_owned(),
            source,
        })?;
        Ok(Self { lifts, trails })
    }

    /// Read `lifts.json` and `trails.json` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, SeedError> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).map_err(|source| SeedError::Io { path, source })
        };
        let seed = Self::from_json(&read(LIFTS_FILE)?, &read(TRAILS_FILE)?)?;
        info!(
            dir = %dir.display(),
            lifts = seed.lifts.len(),
            trails = seed.trails.len(),
            "seed data loaded"
        );
        Ok(seed)
    }

    /// Index the collections into an [`EntityStore`].
    ///
    /// Fails if either collection repeats an id.
    pub fn into_store(self) -> Result<EntityStore, SeedError> {
        Ok(EntityStore::new(self.lifts, self.trails)?)
    }
}
