//! Entity records for the Snowtooth resort.
//!
//! Field names serialize in camelCase to stay compatible with the seed
//! data files (`elevationGain`, and the singular `lift` list on trails).

use serde::{Deserialize, Serialize};

use crate::enums::{LiftStatus, TrailStatus};
use crate::ids::{ActivityId, LiftId, TrailId};

/// A chairlift, gondola, or surface lift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lift {
    /// Unique identifier.
    pub id: LiftId,
    /// Display name.
    pub name: String,
    /// Current operating status. The only field that changes at runtime.
    pub status: LiftStatus,
    /// Seats per chair.
    pub capacity: u32,
    /// Whether the lift runs for night skiing.
    pub night: bool,
    /// Vertical rise in feet.
    pub elevation_gain: i32,
    /// Trails reachable from the top of this lift, in seed order.
    pub trails: Vec<TrailId>,
}

/// A named ski run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    /// Unique identifier.
    pub id: TrailId,
    /// Display name.
    pub name: String,
    /// Current status, absent when the trail has never been rated.
    #[serde(default)]
    pub status: Option<TrailStatus>,
    /// Free-form difficulty rating (`beginner`, `intermediate`, `expert`).
    pub difficulty: String,
    /// Whether the trail is machine groomed.
    pub groomed: bool,
    /// Whether the trail runs through trees.
    pub trees: bool,
    /// Whether the trail is lit for night skiing.
    pub night: bool,
    /// Lifts that reach this trail, in seed order.
    #[serde(rename = "lift", default)]
    pub lifts: Vec<LiftId>,
}

/// A recorded workout pulled from the external activity provider.
///
/// Activities are read-only: nothing in the service mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Provider-assigned identifier.
    pub id: ActivityId,
    /// Title given by the athlete.
    pub name: Option<String>,
    /// Distance in meters.
    pub distance: Option<f64>,
    /// Activity type tag (`AlpineSki`, `Run`, ...).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Elapsed time in seconds.
    pub time: Option<u64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lift_uses_seed_field_names() {
        let json = r#"{
            "id": "astra-express",
            "name": "Astra Express",
            "status": "OPEN",
            "capacity": 6,
            "night": false,
            "elevationGain": 2100,
            "trails": ["blue-bird", "blackhawk"]
        }"#;
        let lift: Lift = serde_json::from_str(json).unwrap();
        assert_eq!(lift.elevation_gain, 2100);
        assert_eq!(lift.trails.len(), 2);
        assert_eq!(lift.trails.first().map(TrailId::as_str), Some("blue-bird"));
    }

    #[test]
    fn trail_status_may_be_missing() {
        let json = r#"{
            "id": "blue-bird",
            "name": "Blue Bird",
            "difficulty": "intermediate",
            "groomed": true,
            "trees": false,
            "night": false,
            "lift": ["astra-express"]
        }"#;
        let trail: Trail = serde_json::from_str(json).unwrap();
        assert_eq!(trail.status, None);
        assert_eq!(trail.lifts, vec![LiftId::new("astra-express")]);

        let back = serde_json::to_value(&trail).unwrap();
        assert!(back.get("lift").is_some());
    }
}
