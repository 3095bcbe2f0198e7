//! The resort context: one store, one bus, and the facades built on them.
//!
//! [`Resort`] is constructed once at startup from an [`EntityStore`] and an
//! [`ActivitySource`] and then shared by every request handler. It is the
//! explicit replacement for process-global state.

use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use futures::Stream;
use snowtooth_types::{Lift, Trail};

use crate::activity::ActivitySource;
use crate::bus::{EventBus, Subscription};
use crate::entity::{Entity, StatusChange};
use crate::mutation::MutationEngine;
use crate::query::QueryFacade;
use crate::store::{EntityStore, SharedStore};

/// Shared service context.
///
/// `Clone` is cheap: every field is reference counted.
#[derive(Debug, Clone)]
pub struct Resort {
    store: SharedStore,
    bus: EventBus<StatusChange>,
    queries: QueryFacade,
    mutations: MutationEngine,
}

impl Resort {
    /// Wire a store and an activity source into a ready-to-serve context.
    pub fn new(store: EntityStore, activities: ActivitySource) -> Self {
        let store = store.into_shared();
        let bus = EventBus::new();
        Self {
            queries: QueryFacade::new(Arc::clone(&store), Arc::new(activities)),
            mutations: MutationEngine::new(Arc::clone(&store), bus.clone()),
            store,
            bus,
        }
    }

    /// Read operations.
    pub const fn queries(&self) -> &QueryFacade {
        &self.queries
    }

    /// Status mutations.
    pub const fn mutations(&self) -> &MutationEngine {
        &self.mutations
    }

    /// The underlying store handle.
    pub const fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Stream of lifts whose status changes after this call.
    pub fn subscribe_lift_status_change(&self) -> StatusStream<Lift> {
        self.subscribe::<Lift>()
    }

    /// Stream of trails whose status changes after this call.
    pub fn subscribe_trail_status_change(&self) -> StatusStream<Trail> {
        self.subscribe::<Trail>()
    }

    /// Stream of status changes for entity kind `E`.
    pub fn subscribe<E: Entity>(&self) -> StatusStream<E> {
        StatusStream {
            inner: self.bus.subscribe(&E::TOPIC),
            kind: PhantomData,
        }
    }

    /// Number of live subscriptions for entity kind `E`.
    pub fn subscriber_count<E: Entity>(&self) -> usize {
        self.bus.subscriber_count(&E::TOPIC)
    }
}

/// Typed view over a status-change subscription.
///
/// Registration happens when the stream is created, not on first poll, so
/// a change published right after subscribing is never missed.
#[derive(Debug)]
pub struct StatusStream<E> {
    inner: Subscription<StatusChange>,
    kind: PhantomData<fn() -> E>,
}

impl<E: Entity> StatusStream<E> {
    /// Wait for the next changed entity.
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            let change = self.inner.recv().await?;
            if let Some(entity) = E::from_change(change) {
                return Some(entity);
            }
        }
    }

    /// Take a changed entity if one is already queued.
    pub fn try_recv(&mut self) -> Option<E> {
        while let Some(change) = self.inner.try_recv() {
            if let Some(entity) = E::from_change(change) {
                return Some(entity);
            }
        }
        None
    }
}

impl<E: Entity> Stream for StatusStream<E> {
    type Item = E;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<E>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(change) => {
                    if let Some(entity) = E::from_change(change) {
                        return Poll::Ready(Some(entity));
                    }
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
