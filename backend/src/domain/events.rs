//! Data-changed event bus.
//!
//! Mutating services publish an event after every successful write; display
//! collaborators subscribe and refetch instead of polling a shared reload
//! flag. Publishing never blocks, and a slow subscriber misses events rather
//! than stalling the writer.

use tokio::sync::broadcast;
use tracing::debug;

/// Notification that stored data changed and derived views are stale.
#[derive(Debug, Clone, PartialEq)]
pub enum DataChanged {
    TransactionCreated {
        user_id: String,
        transaction_id: String,
    },
    TransactionsDeleted {
        user_id: String,
        transaction_ids: Vec<String>,
    },
    BudgetUpdated {
        user_id: String,
    },
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DataChanged>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.sender.subscribe()
    }

    /// Broadcast an event to all current subscribers. An event with no
    /// subscribers is simply dropped.
    pub fn publish(&self, event: DataChanged) {
        debug!("Publishing event: {:?}", event);
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut receiver = bus.subscribe();

        let event = DataChanged::TransactionCreated {
            user_id: "user_1".to_string(),
            transaction_id: "transaction::expense::1".to_string(),
        };
        bus.publish(event.clone());

        assert_eq!(receiver.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(DataChanged::BudgetUpdated {
            user_id: "user_1".to_string(),
        });
    }

    #[tokio::test]
    async fn test_each_subscriber_sees_every_event() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let event = DataChanged::TransactionsDeleted {
            user_id: "user_1".to_string(),
            transaction_ids: vec!["transaction::expense::1".to_string()],
        };
        bus.publish(event.clone());

        assert_eq!(first.recv().await.unwrap(), event);
        assert_eq!(second.recv().await.unwrap(), event);
    }
}
