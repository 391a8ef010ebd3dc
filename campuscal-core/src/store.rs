//! Event storage port and the local cache implementation.

mod local;

pub use local::LocalStore;

use async_trait::async_trait;

use crate::error::CampusCalResult;
use crate::event::{Event, EventDraft, EventStatus};

/// Read/write access to the event collection.
///
/// Implementations own persistence only; who may call what is decided by
/// the lifecycle manager, not re-checked here.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The full event collection.
    async fn list_events(&self) -> CampusCalResult<Vec<Event>>;

    /// Persist a new pending event and return it as stored.
    async fn create_event(&self, draft: EventDraft) -> CampusCalResult<Event>;

    /// Replace only the status of the event with `id`; every other field is
    /// left untouched. `NotFound` if no such event exists.
    async fn set_event_status(&self, id: i64, status: EventStatus) -> CampusCalResult<Event>;
}
