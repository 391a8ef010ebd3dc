//! In-process broadcast of event store changes.
//!
//! Views that render events subscribe while mounted and re-read the store
//! when a change arrives; dropping the receiver unsubscribes on every exit
//! path. Nothing is delivered across restarts: state is re-derived from the
//! store on the next read, not replayed from missed notifications.

use tokio::sync::broadcast;

use crate::event::EventStatus;

/// What changed in the event collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Created { id: i64 },
    StatusChanged { id: i64, status: EventStatus },
}

const CHANNEL_CAPACITY: usize = 64;

/// Broadcast hub for "the event collection changed".
///
/// Senders must only notify after the mutation is durably applied, so a
/// subscriber that re-reads the store always observes it.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<StoreChange>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        ChangeNotifier { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.tx.subscribe()
    }

    /// Best-effort delivery: notifying with no live subscribers is fine.
    pub fn notify(&self, change: StoreChange) {
        let _ = self.tx.send(change);
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}
