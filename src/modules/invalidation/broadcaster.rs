use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

/// Default number of buffered events per subscriber before it starts lagging
const DEFAULT_CAPACITY: usize = 256;

/// Signals that a client-side view is stale for the given users
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewInvalidation {
    /// View path, e.g. "/messages"
    pub path: String,
    /// Users whose copy of the view is stale
    pub audience: Vec<Uuid>,
    /// Shared views such as "/projects" are stale for every connected user
    pub everyone: bool,
    pub at: DateTime<Utc>,
}

impl ViewInvalidation {
    pub fn concerns(&self, user_id: Uuid) -> bool {
        self.everyone || self.audience.contains(&user_id)
    }
}

/// Fan-out of view invalidations to connected subscribers.
///
/// Publishing never blocks; a slow subscriber lags and loses the oldest
/// events instead of holding up the sender.
pub struct ViewInvalidator {
    sender: broadcast::Sender<ViewInvalidation>,
}

impl Default for ViewInvalidator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ViewInvalidator {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an invalidation; returns how many subscribers received it
    pub fn invalidate(&self, path: impl Into<String>, audience: Vec<Uuid>) -> usize {
        self.publish(ViewInvalidation {
            path: path.into(),
            audience,
            everyone: false,
            at: Utc::now(),
        })
    }

    /// Publishes an invalidation of a view every user shares
    pub fn invalidate_all(&self, path: impl Into<String>) -> usize {
        self.publish(ViewInvalidation {
            path: path.into(),
            audience: Vec::new(),
            everyone: true,
            at: Utc::now(),
        })
    }

    fn publish(&self, event: ViewInvalidation) -> usize {
        tracing::debug!(path = %event.path, everyone = event.everyone, "View invalidated");

        // No subscribers is the normal case when nobody is connected
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewInvalidation> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_reaches_subscribers() {
        let invalidator = ViewInvalidator::default();
        let mut rx = invalidator.subscribe();
        let user = Uuid::new_v4();

        assert_eq!(invalidator.invalidate("/messages", vec![user]), 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "/messages");
        assert!(event.concerns(user));
        assert!(!event.concerns(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_invalidate_all_concerns_any_user() {
        let invalidator = ViewInvalidator::default();
        let mut rx = invalidator.subscribe();

        assert_eq!(invalidator.invalidate_all("/projects"), 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, "/projects");
        assert!(event.audience.is_empty());
        assert!(event.concerns(Uuid::new_v4()));
    }

    #[test]
    fn test_invalidate_without_subscribers_is_noop() {
        let invalidator = ViewInvalidator::new(4);
        assert_eq!(invalidator.invalidate("/", Vec::new()), 0);
    }
}
