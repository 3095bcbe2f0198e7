//! Read operations over the entity store.
//!
//! Every call takes a fresh read lock, so results always reflect the
//! latest mutation. Listing treats a missing status as "no filter";
//! counting requires a status and matches it exactly.

use std::sync::Arc;

use serde::Serialize;
use snowtooth_types::{Activity, Lift, LiftId, LiftStatus, Trail, TrailId, TrailStatus};

use crate::activity::{ActivityError, ActivitySource};
use crate::entity::Entity;
use crate::error::ResortError;
use crate::resolver;
use crate::store::SharedStore;

/// A lift together with the trails it currently serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftView {
    /// The lift record.
    #[serde(flatten)]
    pub lift: Lift,
    /// Resolved trails; dangling ids are omitted.
    pub trail_access: Vec<Trail>,
}

/// A trail together with the lifts that currently reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailView {
    /// The trail record.
    #[serde(flatten)]
    pub trail: Trail,
    /// Resolved lifts; dangling ids are omitted.
    pub accessed_by_lifts: Vec<Lift>,
}

/// Read-side facade composing the store, the resolver, and the activity
/// provider.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: SharedStore,
    activities: Arc<ActivitySource>,
}

impl QueryFacade {
    /// Create a facade reading from `store`.
    pub const fn new(store: SharedStore, activities: Arc<ActivitySource>) -> Self {
        Self { store, activities }
    }

    // -- lifts --------------------------------------------------------------

    /// All lifts, or only those with `status`.
    pub async fn list_lifts(&self, status: Option<LiftStatus>) -> Vec<Lift> {
        self.list::<Lift>(status).await
    }

    /// A single lift by id.
    pub async fn get_lift(&self, id: &LiftId) -> Result<Lift, ResortError> {
        self.get::<Lift>(id).await
    }

    /// Number of lifts with exactly `status`.
    pub async fn count_lifts(&self, status: LiftStatus) -> usize {
        self.count::<Lift>(status).await
    }

    /// Trails reachable from `lift`, resolved against the current store.
    pub async fn trail_access(&self, lift: &Lift) -> Vec<Trail> {
        resolver::trail_access(&*self.store.read().await, lift)
    }

    /// A lift and its resolved trails, read under one lock.
    pub async fn lift_view(&self, id: &LiftId) -> Result<LiftView, ResortError> {
        let store = self.store.read().await;
        let lift = store.by_id::<Lift>(id)?.clone();
        let trail_access = resolver::trail_access(&store, &lift);
        Ok(LiftView { lift, trail_access })
    }

    // -- trails -------------------------------------------------------------

    /// All trails, or only those with `status`.
    pub async fn list_trails(&self, status: Option<TrailStatus>) -> Vec<Trail> {
        self.list::<Trail>(status).await
    }

    /// A single trail by id.
    pub async fn get_trail(&self, id: &TrailId) -> Result<Trail, ResortError> {
        self.get::<Trail>(id).await
    }

    /// Number of trails with exactly `status`. Trails without a status are
    /// never counted.
    pub async fn count_trails(&self, status: TrailStatus) -> usize {
        self.count::<Trail>(status).await
    }

    /// Lifts that reach `trail`, resolved against the current store.
    pub async fn accessed_by_lifts(&self, trail: &Trail) -> Vec<Lift> {
        resolver::accessed_by_lifts(&*self.store.read().await, trail)
    }

    /// A trail and its resolved lifts, read under one lock.
    pub async fn trail_view(&self, id: &TrailId) -> Result<TrailView, ResortError> {
        let store = self.store.read().await;
        let trail = store.by_id::<Trail>(id)?.clone();
        let accessed_by_lifts = resolver::accessed_by_lifts(&store, &trail);
        Ok(TrailView {
            trail,
            accessed_by_lifts,
        })
    }

    // -- activities ---------------------------------------------------------

    /// Activities from the external provider.
    pub async fn my_activities(&self) -> Result<Vec<Activity>, ActivityError> {
        self.activities.list().await
    }

    // -- generic ------------------------------------------------------------

    async fn list<E: Entity>(&self, status: Option<E::Status>) -> Vec<E> {
        self.store
            .read()
            .await
            .filter_by_status::<E>(status)
            .cloned()
            .collect()
    }

    async fn get<E: Entity>(&self, id: &E::Id) -> Result<E, ResortError> {
        self.store.read().await.by_id::<E>(id).cloned()
    }

    async fn count<E: Entity>(&self, status: E::Status) -> usize {
        E::collection(&*self.store.read().await).count_by_status(status)
    }
}
