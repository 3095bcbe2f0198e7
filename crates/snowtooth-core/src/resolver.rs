//! Cross-reference resolution between lifts and trails.
//!
//! A lift lists the trails it serves and a trail lists the lifts that reach
//! it. Resolution is a filtering join against the current store: ids with
//! no matching entity are dropped from the result, never reported as
//! errors. Nothing is cached, so every call reflects the latest statuses.

use snowtooth_types::{Lift, Trail};

use crate::entity::Entity;
use crate::store::{Collection, EntityStore};

/// Trails reachable from `lift`, in the lift's listed order.
pub fn trail_access(store: &EntityStore, lift: &Lift) -> Vec<Trail> {
    resolve(store.trails(), &lift.trails)
}

/// Lifts that reach `trail`, in the trail's listed order.
pub fn accessed_by_lifts(store: &EntityStore, trail: &Trail) -> Vec<Lift> {
    resolve(store.lifts(), &trail.lifts)
}

fn resolve<E: Entity>(collection: &Collection<E>, ids: &[E::Id]) -> Vec<E> {
    ids.iter()
        .filter_map(|id| collection.get(id))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowtooth_types::{LiftId, LiftStatus, TrailId, TrailStatus};

    use super::*;

    fn panorama() -> Lift {
        Lift {
            id: LiftId::new("panorama"),
            name: "Panorama".to_owned(),
            status: LiftStatus::Open,
            capacity: 6,
            night: false,
            elevation_gain: 2500,
            trails: vec![TrailId::new("sundance"), TrailId::new("panorama-trail")],
        }
    }

    fn panorama_trail() -> Trail {
        Trail {
            id: TrailId::new("panorama-trail"),
            name: "Panorama Trail".to_owned(),
            status: Some(TrailStatus::Closed),
            difficulty: "expert".to_owned(),
            groomed: false,
            trees: true,
            night: false,
            lifts: vec![LiftId::new("panorama"), LiftId::new("gone")],
        }
    }

    #[test]
    fn dangling_trail_ids_are_dropped() {
        let store = EntityStore::new(vec![panorama()], vec![panorama_trail()]).unwrap();
        let trails = trail_access(&store, &panorama());
        let ids: Vec<&str> = trails.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["panorama-trail"]);
    }

    #[test]
    fn dangling_lift_ids_are_dropped() {
        let store = EntityStore::new(vec![panorama()], vec![panorama_trail()]).unwrap();
        let lifts = accessed_by_lifts(&store, &panorama_trail());
        assert_eq!(lifts, vec![panorama()]);
    }

    #[test]
    fn resolution_reads_current_status() {
        let mut store = EntityStore::new(vec![panorama()], vec![panorama_trail()]).unwrap();
        store
            .by_id_mut::<Trail>(&TrailId::new("panorama-trail"))
            .unwrap()
            .set_status(TrailStatus::Open);

        let trails = trail_access(&store, &panorama());
        assert_eq!(trails.first().and_then(|t| t.status), Some(TrailStatus::Open));
    }
}
