//! Status enumerations for lifts and trails.
//!
//! Both enumerations serialize as upper-case literals (`OPEN`, `HOLD`,
//! `CLOSED`) to match the seed data and the wire format. Parsing from a
//! string accepts exactly those literals; anything else, including
//! `open` or `Hold`, is rejected with [`ParseStatusError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A status literal that does not belong to the targeted enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} `{value}`, expected one of {expected}")]
pub struct ParseStatusError {
    /// Name of the enumeration that rejected the value.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated list of accepted literals.
    pub expected: &'static str,
}

// ---------------------------------------------------------------------------
// Lift status
// ---------------------------------------------------------------------------

/// Operating status of a lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiftStatus {
    /// Loading passengers.
    Open,
    /// Temporarily stopped (wind hold, maintenance stop).
    Hold,
    /// Not running.
    Closed,
}

impl LiftStatus {
    /// Every lift status, in declaration order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Hold, Self::Closed];

    /// The wire literal for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Hold => "HOLD",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiftStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "lift status",
                value: s.to_owned(),
                expected: "OPEN, HOLD, CLOSED",
            })
    }
}

// ---------------------------------------------------------------------------
// Trail status
// ---------------------------------------------------------------------------

/// Whether a trail is open for skiing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrailStatus {
    /// Skiable.
    Open,
    /// Roped off.
    Closed,
}

impl TrailStatus {
    /// Every trail status, in declaration order.
    pub const ALL: [Self; 2] = [Self::Open, Self::Closed];

    /// The wire literal for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TrailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrailStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "trail status",
                value: s.to_owned(),
                expected: "OPEN, CLOSED",
            })
    }
}
