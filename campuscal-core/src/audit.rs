//! Immutable audit records of lifecycle-affecting actions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CampusCalResult;

/// One recorded lifecycle action. Entries are created by the remote service
/// as a side effect of a transition and are never mutated or deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_email: String,
    /// Wire label, e.g. `createEvent`. Kept as a string so unknown labels
    /// from newer servers still display.
    pub action: String,
    pub event_details: String,
    /// Assigned by the remote service.
    pub timestamp: DateTime<Utc>,
}

/// Actions this client records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "createEvent")]
    CreateEvent,
    #[serde(rename = "approveEvent")]
    ApproveEvent,
    #[serde(rename = "rejectEvent")]
    RejectEvent,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AuditAction::CreateEvent => "createEvent",
            AuditAction::ApproveEvent => "approveEvent",
            AuditAction::RejectEvent => "rejectEvent",
        };
        write!(f, "{}", label)
    }
}

/// Order newest-first by remote timestamp.
pub fn sort_newest_first(entries: &mut [AuditLogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Append-only sink for audit records.
///
/// Recording is a best-effort side channel: the lifecycle manager logs a
/// failed `record` and carries on, so a dead audit backend never blocks an
/// approval.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, action: AuditAction, event_id: i64) -> CampusCalResult<()>;

    /// The full entry set; ordering is normalized by the caller.
    async fn list(&self) -> CampusCalResult<Vec<AuditLogEntry>>;
}
