//! In-memory entity store.
//!
//! [`EntityStore`] holds the lift and trail collections for the lifetime of
//! the process. Each [`Collection`] keeps its entities in insertion order
//! alongside an id index, so listing is stable and lookups are O(1).
//!
//! The store is shared as a [`SharedStore`] handle and injected into the
//! query facade and mutation engine at startup. There is no global
//! instance.

use std::collections::HashMap;
use std::sync::Arc;

use snowtooth_types::{Lift, Trail};
use tokio::sync::RwLock;

use crate::entity::Entity;
use crate::error::{ResortError, StoreError};

/// Shared handle to the process-wide store.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// An insertion-ordered collection of one entity kind.
#[derive(Debug, Clone)]
pub struct Collection<E: Entity> {
    items: Vec<E>,
    index: HashMap<E::Id, usize>,
}

impl<E: Entity> Collection<E> {
    /// Build a collection, rejecting duplicate ids.
    pub fn new(items: Vec<E>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id().clone(), position).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: E::KIND,
                    id: item.id().to_string(),
                });
            }
        }
        Ok(Self { items, index })
    }

    /// Every entity, in insertion order.
    pub fn all(&self) -> &[E] {
        &self.items
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).and_then(|&position| self.items.get(position))
    }

    /// Look up an entity by id for in-place mutation.
    pub fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        let position = *self.index.get(id)?;
        self.items.get_mut(position)
    }

    /// Entities with exactly the given status, in insertion order.
    ///
    /// `None` means "no filter" and yields the whole collection.
    pub fn filter_by_status(&self, status: Option<E::Status>) -> impl Iterator<Item = &E> {
        self.items
            .iter()
            .filter(move |item| status.is_none_or(|wanted| item.has_status(wanted)))
    }

    /// Number of entities with exactly the given status.
    pub fn count_by_status(&self, status: E::Status) -> usize {
        self.items.iter().filter(|item| item.has_status(status)).count()
    }

    /// Number of entities in the collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// The lift and trail collections.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    lifts: Collection<Lift>,
    trails: Collection<Trail>,
}

impl EntityStore {
    /// Build a store from seed collections.
    ///
    /// Cross-references between lifts and trails are not checked; dangling
    /// ids are dropped at read time by the resolver.
    pub fn new(lifts: Vec<Lift>, trails: Vec<Trail>) -> Result<Self, StoreError> {
        Ok(Self {
            lifts: Collection::new(lifts)?,
            trails: Collection::new(trails)?,
        })
    }

    /// Wrap the store in a shared handle.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// The lift collection.
    pub const fn lifts(&self) -> &Collection<Lift> {
        &self.lifts
    }

    /// The trail collection.
    pub const fn trails(&self) -> &Collection<Trail> {
        &self.trails
    }

    pub(crate) const fn lifts_mut(&mut self) -> &mut Collection<Lift> {
        &mut self.lifts
    }

    pub(crate) const fn trails_mut(&mut self) -> &mut Collection<Trail> {
        &mut self.trails
    }

    /// Every entity of kind `E`, in insertion order.
    pub fn all<E: Entity>(&self) -> &[E] {
        E::collection(self).all()
    }

    /// Look up an entity of kind `E`, failing with `NotFound`.
    pub fn by_id<E: Entity>(&self, id: &E::Id) -> Result<&E, ResortError> {
        E::collection(self)
            .get(id)
            .ok_or_else(|| ResortError::not_found(E::KIND, id))
    }

    /// Mutable lookup of an entity of kind `E`, failing with `NotFound`.
    pub fn by_id_mut<E: Entity>(&mut self, id: &E::Id) -> Result<&mut E, ResortError> {
        E::collection_mut(self)
            .get_mut(id)
            .ok_or_else(|| ResortError::not_found(E::KIND, id))
    }

    /// Entities of kind `E` filtered by status (`None` = no filter).
    pub fn filter_by_status<E: Entity>(
        &self,
        status: Option<E::Status>,
    ) -> impl Iterator<Item = &E> {
        E::collection(self).filter_by_status(status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowtooth_types::{LiftId, LiftStatus, TrailId, TrailStatus};

    use super::*;
    use crate::error::EntityKind;

    fn lift(id: &str, status: LiftStatus) -> Lift {
        Lift {
            id: LiftId::new(id),
            name: id.to_owned(),
            status,
            capacity: 4,
            night: false,
            elevation_gain: 1000,
            trails: Vec::new(),
        }
    }

    fn trail(id: &str, status: Option<TrailStatus>) -> Trail {
        Trail {
            id: TrailId::new(id),
            name: id.to_owned(),
            status,
            difficulty: "intermediate".to_owned(),
            groomed: true,
            trees: false,
            night: false,
            lifts: Vec::new(),
        }
    }

    fn store() -> EntityStore {
        EntityStore::new(
            vec![
                lift("a", LiftStatus::Open),
                lift("b", LiftStatus::Closed),
                lift("c", LiftStatus::Open),
            ],
            vec![
                trail("x", Some(TrailStatus::Open)),
                trail("y", None),
            ],
        )
        .unwrap()
    }

    #[test]
    fn by_id_finds_every_stored_entity() {
        let store = store();
        for lift in store.all::<Lift>() {
            assert_eq!(store.by_id::<Lift>(&lift.id).unwrap(), lift);
        }
        for trail in store.all::<Trail>() {
            assert_eq!(store.by_id::<Trail>(&trail.id).unwrap(), trail);
        }
    }

    #[test]
    fn by_id_reports_not_found_with_kind() {
        let store = store();
        let err = store.by_id::<Trail>(&TrailId::new("a")).unwrap_err();
        assert_eq!(
            err,
            ResortError::NotFound {
                kind: EntityKind::Trail,
                id: "a".to_owned()
            }
        );
    }

    #[test]
    fn no_status_filter_returns_whole_collection() {
        let store = store();
        assert_eq!(store.filter_by_status::<Lift>(None).count(), 3);
        assert_eq!(store.filter_by_status::<Trail>(None).count(), 2);
    }

    #[test]
    fn status_filter_keeps_insertion_order() {
        let store = store();
        let open: Vec<&str> = store
            .filter_by_status::<Lift>(Some(LiftStatus::Open))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(open, vec!["a", "c"]);
    }

    #[test]
    fn unset_trail_status_matches_no_filter_value() {
        let store = store();
        assert_eq!(store.trails().count_by_status(TrailStatus::Open), 1);
        assert_eq!(store.trails().count_by_status(TrailStatus::Closed), 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = EntityStore::new(
            vec![lift("a", LiftStatus::Open), lift("a", LiftStatus::Hold)],
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateId {
                kind: EntityKind::Lift,
                id: "a".to_owned()
            }
        );
    }
}
