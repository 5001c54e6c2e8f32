//! Push channel abstraction
//!
//! A channel delivers raw events for a topic into an mpsc sink. Delivery is
//! at-least-once: the same event may arrive more than once, and a transport
//! failure is reported in-band as [`ChannelMessage::Error`].

use super::event::InboundEvent;
use crate::error::ChannelError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// What a subscription receives
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelMessage {
    Event(InboundEvent),
    Error(ChannelError),
}

/// Token identifying one live subscription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub id: u64,
    pub topic: String,
}

#[async_trait]
pub trait RealtimeChannel: Send + Sync {
    /// Start delivering `topic` into `sink`
    async fn subscribe(
        &self,
        topic: &str,
        sink: UnboundedSender<ChannelMessage>,
    ) -> Result<SubscriptionHandle, ChannelError>;

    /// Stop delivering; unknown handles are ignored
    async fn unsubscribe(&self, handle: &SubscriptionHandle);
}

#[derive(Default)]
struct Registry {
    subscribers: HashMap<u64, (String, UnboundedSender<ChannelMessage>)>,
    failing_subscribes: usize,
}

/// Loopback channel: whatever is published is delivered to local subscribers
///
/// Used by the binary when no remote push endpoint is configured, and by
/// tests to drive the reconciler.
#[derive(Default)]
pub struct InMemoryChannel {
    registry: Mutex<Registry>,
    next_id: AtomicU64,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Deliver `event` to every subscriber of `topic`; returns how many got it
    pub fn publish(&self, topic: &str, event: InboundEvent) -> usize {
        self.send(topic, ChannelMessage::Event(event))
    }

    /// Report a transport failure to every subscriber of `topic`
    pub fn fail(&self, topic: &str, err: ChannelError) -> usize {
        self.send(topic, ChannelMessage::Error(err))
    }

    /// Make the next `count` subscribe calls fail
    pub fn fail_next_subscribes(&self, count: usize) {
        self.registry().failing_subscribes = count;
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.registry()
            .subscribers
            .values()
            .filter(|(t, _)| t == topic)
            .count()
    }

    fn send(&self, topic: &str, message: ChannelMessage) -> usize {
        let mut registry = self.registry();
        let mut delivered = 0;
        registry.subscribers.retain(|id, (t, sink)| {
            if t != topic {
                return true;
            }
            if sink.send(message.clone()).is_ok() {
                delivered += 1;
                true
            } else {
                log::debug!("Dropping closed subscriber {} on {}", id, topic);
                false
            }
        });
        delivered
    }
}

#[async_trait]
impl RealtimeChannel for InMemoryChannel {
    async fn subscribe(
        &self,
        topic: &str,
        sink: UnboundedSender<ChannelMessage>,
    ) -> Result<SubscriptionHandle, ChannelError> {
        let mut registry = self.registry();
        if registry.failing_subscribes > 0 {
            registry.failing_subscribes -= 1;
            return Err(ChannelError::Subscribe {
                topic: topic.to_string(),
                reason: "refused".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        registry.subscribers.insert(id, (topic.to_string(), sink));
        Ok(SubscriptionHandle {
            id,
            topic: topic.to_string(),
        })
    }

    async fn unsubscribe(&self, handle: &SubscriptionHandle) {
        self.registry().subscribers.remove(&handle.id);
    }
}
