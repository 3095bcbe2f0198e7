//! Type-safe identifier wrappers around [`String`].
//!
//! Lifts and trails are identified by human-readable slugs such as
//! `astra-express` or `blue-bird`. Wrapping them in distinct newtypes
//! prevents a trail id from being looked up in the lift collection.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a lift.
    LiftId
}

define_id! {
    /// Unique identifier for a trail.
    TrailId
}

define_id! {
    /// Identifier assigned to an activity by the external provider.
    ActivityId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = LiftId::new("astra-express");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"astra-express\"");

        let back: TrailId = serde_json::from_str("\"blue-bird\"").unwrap();
        assert_eq!(back.as_str(), "blue-bird");
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(TrailId::from("sundance").to_string(), "sundance");
    }
}
