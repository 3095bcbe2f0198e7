//! Error types for the resort core.
//!
//! [`ResortError`] covers the only two failures a read or a status change
//! can produce. Store construction, seed loading, and the activity
//! provider each have their own error type so their failure domains stay
//! separate from request handling.

use std::fmt;
use std::path::PathBuf;

use snowtooth_types::ParseStatusError;

/// The entity collection an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The lift collection.
    Lift,
    /// The trail collection.
    Trail,
}

impl EntityKind {
    /// Lower-case name used in messages and log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lift => "lift",
            Self::Trail => "trail",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by queries and status mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResortError {
    /// No entity with this id exists in the targeted collection.
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// The collection that was searched.
        kind: EntityKind,
        /// The id that had no match.
        id: String,
    },

    /// A status value outside the declared enumeration.
    #[error(transparent)]
    InvalidEnum(#[from] ParseStatusError),
}

impl ResortError {
    /// Build a [`ResortError::NotFound`] for the given collection and id.
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Errors raised while assembling an [`EntityStore`](crate::store::EntityStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Two entities in one collection share an id.
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId {
        /// The collection containing the duplicate.
        kind: EntityKind,
        /// The repeated id.
        id: String,
    },
}

/// Errors raised while loading the initial lift and trail collections.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A seed file could not be read.
    #[error("failed to read seed file {}: {source}", path.display())]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A seed file is not valid JSON for its entity type.
    #[error("failed to parse {file}: {source}")]
    Json {
        /// Name of the offending file.
        file: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The decoded collections violate a store invariant.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = ResortError::not_found(EntityKind::Lift, "panorama");
        assert_eq!(err.to_string(), "lift `panorama` not found");
    }

    #[test]
    fn invalid_enum_is_transparent() {
        let parse = ParseStatusError {
            kind: "lift status",
            value: "SIDEWAYS".to_owned(),
            expected: "OPEN, HOLD, CLOSED",
        };
        let err = ResortError::from(parse.clone());
        assert_eq!(err.to_string(), parse.to_string());
    }
}
