//! Topic-based publish/subscribe bus.
//!
//! Every [`Subscription`] owns its own unbounded channel; the bus only keeps
//! a registry of sender handles per [`Topic`]. Publishing walks the
//! registry and enqueues a clone of the payload on each live channel, so a
//! slow consumer never blocks the publisher or any other subscriber.
//!
//! Delivery is at-most-once with no replay: a subscription only sees
//! payloads published after it was created. Dropping a subscription closes
//! its channel and the sender is pruned on the next publish to that topic.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, trace};
use uuid::Uuid;

/// Name of a bus channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    /// Topic carrying lifts whose status just changed.
    pub const LIFT_STATUS_CHANGE: Self = Self::from_static("lift-status-change");

    /// Topic carrying trails whose status just changed.
    pub const TRAIL_STATUS_CHANGE: Self = Self::from_static("trail-status-change");

    /// Build a topic from a string literal.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Build a topic from an owned name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The topic name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a live subscription, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Subscriber<P> {
    id: SubscriptionId,
    tx: mpsc::UnboundedSender<P>,
}

type Registry<P> = HashMap<Topic, Vec<Subscriber<P>>>;

/// Fan-out bus routing payloads of type `P` to per-topic subscribers.
///
/// `Clone` is cheap: clones share the same registry.
pub struct EventBus<P> {
    topics: Arc<RwLock<Registry<P>>>,
}

impl<P: Clone + Send + 'static> EventBus<P> {
    /// Create a bus with no topics.
    pub fn new() -> Self {
        Self {
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new subscription on `topic`.
    ///
    /// The topic is created if it does not exist yet. The returned
    /// subscription receives every payload published from now on.
    /// Closed subscriptions on the topic are pruned first.
    pub fn subscribe(&self, topic: &Topic) -> Subscription<P> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SubscriptionId::new();

        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        let subscribers = topics.entry(topic.clone()).or_default();
        subscribers.retain(|subscriber| !subscriber.tx.is_closed());
        subscribers.push(Subscriber { id, tx });
        debug!(%topic, subscription = %id, subscribers = subscribers.len(), "subscription registered");

        Subscription {
            id,
            topic: topic.clone(),
            rx,
        }
    }

    /// Deliver `payload` to every live subscriber on `topic`.
    ///
    /// Never blocks and never fails. Returns the number of subscriptions
    /// the payload was enqueued on; zero subscribers is not an error.
    pub fn publish(&self, topic: &Topic, payload: P) -> usize {
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        let subscribers = topics.entry(topic.clone()).or_default();

        let before = subscribers.len();
        subscribers.retain(|subscriber| {
            let delivered = subscriber.tx.send(payload.clone()).is_ok();
            if !delivered {
                debug!(%topic, subscription = %subscriber.id, "pruned closed subscription");
            }
            delivered
        });

        let delivered = subscribers.len();
        if before == 0 {
            trace!(%topic, "published with no subscribers");
        }
        delivered
    }

    /// Number of subscriptions on `topic` whose consumer is still alive.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map_or(0, |subscribers| {
                subscribers.iter().filter(|s| !s.tx.is_closed()).count()
            })
    }
}

impl<P: Clone + Send + 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics = self.topics.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("EventBus")
            .field("topics", &topics.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A live registration on one topic.
///
/// Yields payloads lazily through [`Subscription::recv`] or as a
/// [`Stream`]. The stream only ends if the bus itself is dropped; dropping
/// the subscription ends it for good.
#[derive(Debug)]
pub struct Subscription<P> {
    id: SubscriptionId,
    topic: Topic,
    rx: mpsc::UnboundedReceiver<P>,
}

impl<P> Subscription<P> {
    /// Wait for the next payload.
    pub async fn recv(&mut self) -> Option<P> {
        self.rx.recv().await
    }

    /// Take a payload if one is already queued.
    pub fn try_recv(&mut self) -> Option<P> {
        self.rx.try_recv().ok()
    }

    /// This subscription's identifier.
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The topic this subscription listens on.
    pub const fn topic(&self) -> &Topic {
        &self.topic
    }
}

impl<P> Stream for Subscription<P> {
    type Item = P;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<P>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;

    use super::*;

    fn topic() -> Topic {
        Topic::from_static("test-topic")
    }

    fn registered(bus: &EventBus<u32>, topic: &Topic) -> usize {
        bus.topics.read().unwrap().get(topic).map_or(0, Vec::len)
    }

    #[tokio::test]
    async fn every_subscriber_receives_a_publish() {
        let bus = EventBus::new();
        let mut a = bus.subscribe(&topic());
        let mut b = bus.subscribe(&topic());

        assert_eq!(bus.publish(&topic(), 7_u32), 2);

        assert_eq!(a.recv().await, Some(7));
        assert_eq!(b.next().await, Some(7));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus: EventBus<u32> = EventBus::new();
        assert_eq!(bus.publish(&topic(), 1), 0);
        assert_eq!(bus.subscriber_count(&topic()), 0);
    }

    #[tokio::test]
    async fn late_subscriber_sees_no_replay() {
        let bus = EventBus::new();
        bus.publish(&topic(), 1_u32);

        let mut late = bus.subscribe(&topic());
        assert_eq!(late.try_recv(), None);

        bus.publish(&topic(), 2);
        assert_eq!(late.recv().await, Some(2));
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let bus = EventBus::new();
        let other = Topic::new("other");
        let mut sub = bus.subscribe(&other);

        bus.publish(&topic(), 1_u32);
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn slow_subscriber_does_not_block_others() {
        let bus = EventBus::new();
        let _idle = bus.subscribe(&topic());
        let mut active = bus.subscribe(&topic());

        for n in 0..1000_u32 {
            bus.publish(&topic(), n);
        }

        let first_ten: Vec<u32> = (&mut active).take(10).collect().await;
        assert_eq!(first_ten, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned() {
        let bus = EventBus::new();
        let dropped = bus.subscribe(&topic());
        let _kept = bus.subscribe(&topic());
        drop(dropped);

        assert_eq!(bus.subscriber_count(&topic()), 1);
        assert_eq!(bus.publish(&topic(), 1_u32), 1);
    }

    #[tokio::test]
    async fn churn_without_publish_keeps_registry_bounded() {
        let bus: EventBus<u32> = EventBus::new();
        let _kept = bus.subscribe(&topic());

        for _ in 0..10_000 {
            drop(bus.subscribe(&topic()));
        }

        // Only the kept subscription and the most recent dropped one remain.
        assert!(registered(&bus, &topic()) <= 2);
        assert_eq!(bus.subscriber_count(&topic()), 1);
    }
}
