//! Transient toast notifications

use std::time::{Duration, Instant};

use cexdeck_core::types::Severity;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// Notifications in arrival order. Ids come from a monotonic counter and are
/// never reused.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.enqueue_at(message, severity, Instant::now())
    }

    /// Enqueue as if `now` were the current instant.
    pub fn enqueue_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            expires_at: now + NOTIFICATION_TTL,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.enqueue(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.enqueue(message, Severity::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.enqueue(message, Severity::Info)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.enqueue(message, Severity::Warning)
    }

    /// Remove one notification. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Drop every notification whose lifetime has passed. Returns how many
    /// were removed.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| n.expires_at > now);
        before - self.items.len()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut queue = NotificationQueue::new();
        let t0 = Instant::now();
        queue.enqueue_at("Saved", Severity::Success, t0);

        queue.prune_expired(t0 + Duration::from_millis(10));
        assert_eq!(queue.len(), 1);

        queue.prune_expired(t0 + Duration::from_millis(3999));
        assert_eq!(queue.len(), 1);

        queue.prune_expired(t0 + Duration::from_millis(4010));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_order_kept() {
        let mut queue = NotificationQueue::new();
        let a = queue.info("a");
        let b = queue.info("b");
        let c = queue.error("c");
        assert!(a < b && b < c);

        let messages: Vec<_> = queue.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_identical_messages_not_coalesced() {
        let mut queue = NotificationQueue::new();
        queue.error("Failed");
        queue.error("Failed");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut queue = NotificationQueue::new();
        let id = queue.warning("w");
        queue.info("keep");

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("keep"));
    }

    #[test]
    fn test_ids_not_reused_after_dismiss() {
        let mut queue = NotificationQueue::new();
        let first = queue.info("x");
        queue.dismiss(first);
        let second = queue.info("y");
        assert_ne!(first, second);
    }

    #[test]
    fn test_dismiss_latest() {
        let mut queue = NotificationQueue::new();
        queue.info("old");
        queue.info("new");
        assert!(queue.dismiss_latest());
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("old"));
    }

    #[test]
    fn test_staggered_expiry() {
        let mut queue = NotificationQueue::new();
        let t0 = Instant::now();
        queue.enqueue_at("first", Severity::Info, t0);
        queue.enqueue_at("second", Severity::Info, t0 + Duration::from_millis(2000));

        assert_eq!(queue.prune_expired(t0 + Duration::from_millis(4001)), 1);
        assert_eq!(queue.latest().map(|n| n.message.as_str()), Some("second"));
    }
}
