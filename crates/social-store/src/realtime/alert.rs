//! User-facing alerts for freshly arrived notifications

use crate::domain_models::Notification;

/// Best-effort alert (sound, toast, desktop popup)
///
/// Called at most once per notification id. A failure is logged by the
/// caller and never affects state.
pub trait AlertSink: Send + Sync {
    fn alert(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Writes the notification's one-line description to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlert;

impl AlertSink for LogAlert {
    fn alert(&self, notification: &Notification) -> anyhow::Result<()> {
        log::info!("🔔 {}", notification.describe());
        Ok(())
    }
}
