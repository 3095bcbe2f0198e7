//! Status mutations.
//!
//! [`MutationEngine`] is the only writer of the entity store. A successful
//! status change overwrites the field in place, publishes the updated
//! entity on the kind's topic, and returns it to the caller. Publishing
//! happens under the store's write lock and never awaits, so events reach
//! subscribers in write order.

use snowtooth_types::{Lift, LiftId, LiftStatus, Trail, TrailId, TrailStatus};
use tracing::{debug, info};

use crate::bus::EventBus;
use crate::entity::{Entity, StatusChange};
use crate::error::ResortError;
use crate::store::SharedStore;

/// Applies status changes and emits change events.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    store: SharedStore,
    bus: EventBus<StatusChange>,
}

impl MutationEngine {
    /// Create an engine writing to `store` and publishing on `bus`.
    pub const fn new(store: SharedStore, bus: EventBus<StatusChange>) -> Self {
        Self { store, bus }
    }

    /// Set a lift's status.
    pub async fn set_lift_status(
        &self,
        id: &LiftId,
        status: LiftStatus,
    ) -> Result<Lift, ResortError> {
        self.set_status::<Lift>(id, status).await
    }

    /// Set a trail's status.
    pub async fn set_trail_status(
        &self,
        id: &TrailId,
        status: TrailStatus,
    ) -> Result<Trail, ResortError> {
        self.set_status::<Trail>(id, status).await
    }

    /// Overwrite the status of entity `id` and publish the result.
    ///
    /// Fails with `NotFound` before touching the store if `id` is unknown.
    /// Any transition within the enumeration is allowed.
    pub async fn set_status<E: Entity>(
        &self,
        id: &E::Id,
        status: E::Status,
    ) -> Result<E, ResortError> {
        // Event order matches write order: publish under the guard.
        let (previous, updated, delivered) = {
            let mut store = self.store.write().await;
            let entity = store.by_id_mut::<E>(id)?;
            let previous = entity.status();
            entity.set_status(status);
            let updated = entity.clone();
            let delivered = self.bus.publish(&E::TOPIC, updated.clone().into_change());
            (previous, updated, delivered)
        };

        info!(
            kind = %E::KIND,
            id = %id,
            from = ?previous,
            to = %status,
            "status changed"
        );
        debug!(kind = %E::KIND, id = %id, delivered, "status change published");

        Ok(updated)
    }
}
