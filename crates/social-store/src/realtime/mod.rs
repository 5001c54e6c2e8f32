//! Realtime notification delivery
//!
//! - [`channel`]: the push transport seam plus an in-memory loopback
//! - [`event`]: raw events and their normalization
//! - [`alert`]: best-effort user alerts
//! - [`reconciler`]: subscription lifecycle and merging into the store

pub mod alert;
pub mod channel;
pub mod event;
pub mod reconciler;

pub use alert::{AlertSink, LogAlert};
pub use channel::{ChannelMessage, InMemoryChannel, RealtimeChannel, SubscriptionHandle};
pub use event::{normalize, EventSource, InboundEvent, Normalized};
pub use reconciler::{topic_for, RealtimeReconciler, RealtimeSettings};
