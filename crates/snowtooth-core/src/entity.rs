//! The [`Entity`] trait shared by lifts and trails.
//!
//! Store, resolver, query, and mutation code is written once against this
//! trait and instantiated for [`Lift`] and [`Trail`]. Each entity kind
//! also owns its status-change topic on the event bus.

use std::fmt;
use std::hash::Hash;

use snowtooth_types::{Lift, LiftId, LiftStatus, Trail, TrailId, TrailStatus};

use crate::bus::Topic;
use crate::error::EntityKind;
use crate::store::{Collection, EntityStore};

/// A record held in one of the store's collections.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type. Unique within the collection.
    type Id: Clone + Eq + Hash + fmt::Display + Send + Sync;
    /// Status enumeration. The only mutable field.
    type Status: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync;

    /// Which collection this entity lives in.
    const KIND: EntityKind;

    /// Bus topic that carries status changes for this kind.
    const TOPIC: Topic;

    /// The entity's identifier.
    fn id(&self) -> &Self::Id;

    /// Current status, `None` when unset.
    fn status(&self) -> Option<Self::Status>;

    /// Overwrite the status in place.
    fn set_status(&mut self, status: Self::Status);

    /// Borrow this kind's collection from the store.
    fn collection(store: &EntityStore) -> &Collection<Self>;

    /// Mutably borrow this kind's collection from the store.
    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self>;

    /// Wrap the entity as a bus payload.
    fn into_change(self) -> StatusChange;

    /// Unwrap a bus payload of this kind.
    fn from_change(change: StatusChange) -> Option<Self>;

    /// Exact status match. An unset status matches nothing.
    fn has_status(&self, status: Self::Status) -> bool {
        self.status() == Some(status)
    }
}

/// Payload published on the event bus after a status mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// A lift after its status changed.
    Lift(Lift),
    /// A trail after its status changed.
    Trail(Trail),
}

impl Entity for Lift {
    type Id = LiftId;
    type Status = LiftStatus;

    const KIND: EntityKind = EntityKind::Lift;
    const TOPIC: Topic = Topic::LIFT_STATUS_CHANGE;

    fn id(&self) -> &LiftId {
        &self.id
    }

    fn status(&self) -> Option<LiftStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: LiftStatus) {
        self.status = status;
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        store.lifts()
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self> {
        store.lifts_mut()
    }

    fn into_change(self) -> StatusChange {
        StatusChange::Lift(self)
    }

    fn from_change(change: StatusChange) -> Option<Self> {
        match change {
            StatusChange::Lift(lift) => Some(lift),
            StatusChange::Trail(_) => None,
        }
    }
}

impl Entity for Trail {
    type Id = TrailId;
    type Status = TrailStatus;

    const KIND: EntityKind = EntityKind::Trail;
    const TOPIC: Topic = Topic::TRAIL_STATUS_CHANGE;

    fn id(&self) -> &TrailId {
        &self.id
    }

    fn status(&self) -> Option<TrailStatus> {
        self.status
    }

    fn set_status(&mut self, status: TrailStatus) {
        self.status = Some(status);
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        store.trails()
    }

    fn collection_mut(store: &mut EntityStore) -> &mut Collection<Self> {
        store.trails_mut()
    }

    fn into_change(self) -> StatusChange {
        StatusChange::Trail(self)
    }

    fn from_change(change: StatusChange) -> Option<Self> {
        match change {
            StatusChange::Trail(trail) => Some(trail),
            StatusChange::Lift(_) => None,
        }
    }
}
