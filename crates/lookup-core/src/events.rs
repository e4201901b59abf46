use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::selection::SelectionStore;

/// Host-facing name of the change notification, for hosts that bridge it
/// onto a named event bus.
pub const SELECTION_EVENT: &str = "lookupselect";

/// Payload of every selection notification, identical in single and multi
/// mode: comma-joined ids of the current selection, "" when empty. Hosts
/// never need to branch on mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub record_id: String,
}

/// Fans selection changes out to subscribed hosts.
///
/// Subscriptions are channel-scoped: a host holds the receiver while it is
/// active and simply drops it to deregister. Closed subscribers are pruned
/// on the next emit, so nothing leaks across host lifetimes.
#[derive(Debug, Default)]
pub struct EventEmitter {
    subscribers: Vec<UnboundedSender<SelectionChange>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<SelectionChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Notify every live subscriber of the store's current contents.
    pub fn emit(&mut self, store: &SelectionStore) {
        let change = SelectionChange {
            record_id: store.joined_ids(),
        };
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
