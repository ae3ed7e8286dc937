//! Transient user-facing notifications with auto-expiry.
//!
//! A [`Notifier`] is created once at the composition root and handed to
//! whatever needs to report status. Each notification stays visible until
//! its duration elapses or it is dismissed, whichever comes first.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use super::error::NotifyError;
use crate::core::utils::new_id;

pub const DEFAULT_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Notification),
    Removed(String),
}

struct Shared {
    visible: Mutex<Vec<Notification>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl Shared {
    fn remove(&self, id: &str) -> bool {
        let mut visible = self.visible.lock().unwrap_or_else(PoisonError::into_inner);
        let before = visible.len();
        visible.retain(|n| n.id != id);
        let removed = visible.len() != before;
        drop(visible);
        if removed {
            let _ = self.events.send(NotificationEvent::Removed(id.to_string()));
        }
        removed
    }
}

/// Publishes notifications and expires them on a timer.
#[derive(Clone)]
pub struct Notifier {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl Notifier {
    /// Fails with [`NotifyError::NoRuntime`] outside a tokio runtime.
    pub fn new() -> Result<Self, NotifyError> {
        let runtime = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        let (events, _) = broadcast::channel(64);
        Ok(Self {
            shared: Arc::new(Shared {
                visible: Mutex::new(Vec::new()),
                events,
            }),
            runtime,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.shared.events.subscribe()
    }

    /// Shows `message` for [`DEFAULT_DURATION_MS`].
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> String {
        self.notify_for(kind, message, DEFAULT_DURATION_MS)
    }

    /// Shows `message` for `duration_ms` and returns its id.
    ///
    /// Subscribers always see the `Shown` event. A zero duration never
    /// enters the visible list.
    pub fn notify_for(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration_ms: u64,
    ) -> String {
        let notification = Notification {
            id: new_id(),
            kind,
            message: message.into(),
            duration_ms,
            created_at: Utc::now(),
        };
        let id = notification.id.clone();
        tracing::debug!(%id, %kind, message = %notification.message, "notification");

        if duration_ms == 0 {
            let _ = self.shared.events.send(NotificationEvent::Shown(notification));
            let _ = self.shared.events.send(NotificationEvent::Removed(id.clone()));
            return id;
        }

        self.shared
            .visible
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        let _ = self.shared.events.send(NotificationEvent::Shown(notification));

        let shared = Arc::clone(&self.shared);
        let expiring = id.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
            shared.remove(&expiring);
        });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.notify(NotificationKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.notify(NotificationKind::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.notify(NotificationKind::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.notify(NotificationKind::Info, message)
    }

    /// Removes a notification early. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: &str) -> bool {
        self.shared.remove(id)
    }

    /// Currently visible notifications, oldest first.
    pub fn visible(&self) -> Vec<Notification> {
        self.shared
            .visible
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_runtime() {
        assert_eq!(Notifier::new().err(), Some(NotifyError::NoRuntime));
    }

    #[tokio::test(start_paused = true)]
    async fn notifications_expire_after_their_duration() {
        let notifier = Notifier::new().unwrap();
        notifier.success("saved");
        notifier.notify_for(NotificationKind::Info, "short", 1000);

        let messages: Vec<String> = notifier.visible().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["saved", "short"]);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        let messages: Vec<String> = notifier.visible().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["saved"]);

        tokio::time::sleep(Duration::from_millis(DEFAULT_DURATION_MS)).await;
        tokio::task::yield_now().await;
        assert!(notifier.visible().is_empty());
    }

    #[tokio::test]
    async fn zero_duration_is_never_visible() {
        let notifier = Notifier::new().unwrap();
        let mut rx = notifier.subscribe();

        let id = notifier.notify_for(NotificationKind::Warning, "blink", 0);
        assert!(notifier.visible().is_empty());

        match rx.recv().await.unwrap() {
            NotificationEvent::Shown(n) => assert_eq!(n.message, "blink"),
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(rx.recv().await.unwrap(), NotificationEvent::Removed(id));
    }

    #[tokio::test]
    async fn dismiss_removes_early_and_only_once() {
        let notifier = Notifier::new().unwrap();
        let first = notifier.error("first");
        let second = notifier.info("second");

        assert!(notifier.dismiss(&first));
        assert!(!notifier.dismiss(&first));

        let remaining = notifier.visible();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second);
        assert_eq!(remaining[0].kind, NotificationKind::Info);
    }

    #[tokio::test]
    async fn duplicates_are_kept_in_order() {
        let notifier = Notifier::new().unwrap();
        notifier.info("same");
        notifier.info("same");
        assert_eq!(notifier.visible().len(), 2);
    }
}
