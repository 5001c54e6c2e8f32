//! Realtime event reconciler
//!
//! Owns the single notification subscription of the signed-in profile.
//! Channel deliveries land in an unbounded mpsc queue drained by one worker
//! task, which normalizes each event, enriches partial ones from the API,
//! drops duplicates and dispatches `addNotification` for new ids.

use super::alert::AlertSink;
use super::channel::{ChannelMessage, RealtimeChannel, SubscriptionHandle};
use super::event::{normalize, InboundEvent, Normalized};
use crate::actions::{Action, NotificationsAction};
use crate::domain_models::{Notification, NotificationId, ProfileId};
use crate::error::{ChannelError, ThunkError};
use crate::store::Store;
use crate::thunks::{decode_field, SharedApi};
use social_api::Method;
use social_config::AppConfig;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Retry and alert behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeSettings {
    pub resubscribe_attempts: u32,
    pub resubscribe_delay: Duration,
    pub sound_enabled: bool,
}

impl RealtimeSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            resubscribe_attempts: config.realtime.resubscribe_attempts,
            resubscribe_delay: Duration::from_millis(config.realtime.resubscribe_delay_ms),
            sound_enabled: config.notifications.sound_enabled,
        }
    }
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Topic carrying notifications addressed to `profile_id`
pub fn topic_for(profile_id: &ProfileId) -> String {
    format!("notifications:{}", profile_id)
}

type HandleSlot = Arc<Mutex<Option<SubscriptionHandle>>>;

struct ActiveSubscription {
    topic: String,
    handle: HandleSlot,
    worker: JoinHandle<()>,
}

struct Inner {
    store: Store,
    api: SharedApi,
    channel: Arc<dyn RealtimeChannel>,
    alert: Arc<dyn AlertSink>,
    settings: RealtimeSettings,
    active: Mutex<Option<ActiveSubscription>>,
}

/// Cloneable handle; all clones share one subscription
#[derive(Clone)]
pub struct RealtimeReconciler {
    inner: Arc<Inner>,
}

impl RealtimeReconciler {
    pub fn new(
        store: Store,
        api: SharedApi,
        channel: Arc<dyn RealtimeChannel>,
        alert: Arc<dyn AlertSink>,
        settings: RealtimeSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                api,
                channel,
                alert,
                settings,
                active: Mutex::new(None),
            }),
        }
    }

    /// Subscribe for `profile_id`, replacing any previous subscription
    pub async fn start(&self, profile_id: ProfileId) -> Result<(), ChannelError> {
        let mut active = self.inner.active.lock().await;
        if let Some(previous) = active.take() {
            log::debug!("Replacing subscription on {}", previous.topic);
            teardown(&self.inner, previous).await;
        }

        let topic = topic_for(&profile_id);
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.inner.channel.subscribe(&topic, tx.clone()).await?;
        log::info!("Subscribed to {}", topic);

        let handle: HandleSlot = Arc::new(Mutex::new(Some(handle)));
        let worker = tokio::spawn(run_worker(
            Arc::clone(&self.inner),
            profile_id,
            topic.clone(),
            tx,
            rx,
            Arc::clone(&handle),
        ));

        *active = Some(ActiveSubscription {
            topic,
            handle,
            worker,
        });
        Ok(())
    }

    /// Tear the subscription down; a no-op when none is active
    pub async fn stop(&self) {
        if let Some(previous) = self.inner.active.lock().await.take() {
            log::info!("Unsubscribing from {}", previous.topic);
            teardown(&self.inner, previous).await;
        }
    }

    pub async fn is_active(&self) -> bool {
        self.inner.active.lock().await.is_some()
    }
}

async fn teardown(inner: &Inner, subscription: ActiveSubscription) {
    subscription.worker.abort();
    if let Err(err) = subscription.worker.await {
        if !err.is_cancelled() {
            log::error!("Realtime worker for {} failed: {}", subscription.topic, err);
        }
    }
    if let Some(handle) = subscription.handle.lock().await.take() {
        inner.channel.unsubscribe(&handle).await;
    }
}

/// How many dispatched ids the worker remembers beyond the store itself
const SEEN_CAPACITY: usize = 512;

/// Ids dispatched recently, oldest forgotten first
///
/// Covers the window where a duplicate delivery races an id that was
/// dispatched and then removed from the store.
struct RecentIds {
    order: VecDeque<NotificationId>,
    ids: HashSet<NotificationId>,
    capacity: usize,
}

impl RecentIds {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            ids: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    fn contains(&self, id: &NotificationId) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, id: NotificationId) {
        if !self.ids.insert(id.clone()) {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.order.len()
    }
}

async fn run_worker(
    inner: Arc<Inner>,
    profile_id: ProfileId,
    topic: String,
    tx: UnboundedSender<ChannelMessage>,
    mut rx: UnboundedReceiver<ChannelMessage>,
    handle: HandleSlot,
) {
    log::debug!("Realtime worker started for {}", topic);
    let mut seen = RecentIds::new(SEEN_CAPACITY);

    while let Some(message) = rx.recv().await {
        match message {
            ChannelMessage::Event(event) => {
                reconcile(&inner, &event, &profile_id, &mut seen).await;
            }
            ChannelMessage::Error(err) => {
                log::warn!("Realtime channel error on {}: {}", topic, err);
                resubscribe(&inner, &topic, &tx, &handle).await;
            }
        }
    }

    log::debug!("Realtime worker for {} stopped", topic);
}

async fn reconcile(
    inner: &Inner,
    event: &InboundEvent,
    profile_id: &ProfileId,
    seen: &mut RecentIds,
) {
    let normalized = normalize(event, profile_id);
    let Some(id) = normalized.id().cloned() else {
        if let Normalized::Invalid(reason) = normalized {
            log::warn!("Dropping realtime event: {}", reason);
        }
        return;
    };

    let known = inner.store.get_state().notifications.find(&id).is_some();
    if known || seen.contains(&id) {
        log::debug!("Notification {} already known, skipping", id);
        return;
    }

    let notification = match normalized {
        Normalized::Complete(notification) => notification,
        Normalized::Partial(partial) => enrich(inner, partial).await,
        Normalized::Invalid(_) => return,
    };

    seen.insert(id);
    inner
        .store
        .dispatch(Action::Notifications(NotificationsAction::AddNotification(
            notification.clone(),
        )));

    if inner.settings.sound_enabled {
        if let Err(err) = inner.alert.alert(&notification) {
            log::warn!("Alert for notification {} failed: {:#}", notification.id, err);
        }
    }
}

/// Fetch the full record; keep the partial shape if that fails
async fn enrich(inner: &Inner, partial: Notification) -> Notification {
    let fetched: Result<Notification, ThunkError> = async {
        let value = inner
            .api
            .request(Method::Get, &format!("/notifications/{}", partial.id), None)
            .await?;
        decode_field(value, "notification")
    }
    .await;

    match fetched {
        Ok(full) => full,
        Err(err) => {
            log::warn!(
                "Could not load details for notification {}, using event data: {}",
                partial.id,
                err
            );
            partial
        }
    }
}

async fn resubscribe(
    inner: &Inner,
    topic: &str,
    tx: &UnboundedSender<ChannelMessage>,
    handle: &HandleSlot,
) {
    let mut slot = handle.lock().await;
    if let Some(stale) = slot.take() {
        inner.channel.unsubscribe(&stale).await;
    }

    let attempts = inner.settings.resubscribe_attempts;
    for attempt in 1..=attempts {
        tokio::time::sleep(inner.settings.resubscribe_delay).await;
        match inner.channel.subscribe(topic, tx.clone()).await {
            Ok(fresh) => {
                log::info!("Resubscribed to {} (attempt {}/{})", topic, attempt, attempts);
                *slot = Some(fresh);
                return;
            }
            Err(err) => {
                log::warn!("Resubscribe attempt {}/{} failed: {}", attempt, attempts, err);
            }
        }
    }

    log::error!("Giving up on {} after {} attempts", topic, attempts);
}
