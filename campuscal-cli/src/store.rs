//! Remote-first event store with local cache fallback.

use async_trait::async_trait;
use tracing::warn;

use campuscal_core::audit::{AuditAction, AuditLogEntry, AuditSink};
use campuscal_core::error::{CampusCalError, CampusCalResult};
use campuscal_core::event::{Event, EventDraft, EventStatus};
use campuscal_core::profile::Profile;
use campuscal_core::store::{EventStore, LocalStore};

use crate::client::RemoteClient;

/// The event store the CLI runs against.
///
/// Reads prefer the remote service and degrade to the local cache when it is
/// unreachable. The service exposes no write endpoints, so mutations land in
/// the local store; a successful remote read is merged with those local
/// mutations before it refreshes the cache, never over them. Without a
/// remote this is plain cache-only mode.
pub struct CachedStore {
    remote: Option<RemoteClient>,
    local: LocalStore,
}

impl CachedStore {
    pub fn new(remote: Option<RemoteClient>, local: LocalStore) -> Self {
        CachedStore { remote, local }
    }

    /// The acting profile: remote when a token is configured (cached as the
    /// fallback copy), otherwise whatever the cache last saw.
    pub async fn profile(&self) -> CampusCalResult<Option<Profile>> {
        let Some(remote) = &self.remote else {
            return self.local.cached_profile();
        };
        match remote.fetch_profile().await {
            Ok(profile) => {
                if let Err(err) = self.local.save_profile(&profile) {
                    warn!(%err, "failed to cache profile");
                }
                Ok(Some(profile))
            }
            Err(err) => {
                warn!(%err, "profile fetch failed, using cached profile");
                self.local.cached_profile()
            }
        }
    }
}

#[async_trait]
impl EventStore for CachedStore {
    async fn list_events(&self) -> CampusCalResult<Vec<Event>> {
        let Some(remote) = &self.remote else {
            return self.local.list_events().await;
        };
        match remote.list_events().await {
            Ok(events) => {
                // Events created here and decisions applied here are not
                // known to the remote; fold them in before refreshing the
                // cache so a listing never un-does a mutation.
                let merged = merge_events(events, self.local.list_events().await?);
                if let Err(err) = self.local.mirror_events(&merged) {
                    warn!(%err, "failed to mirror events to local cache");
                }
                Ok(merged)
            }
            Err(err) => {
                warn!(%err, "remote listing failed, falling back to local cache");
                self.local.list_events().await
            }
        }
    }

    async fn create_event(&self, draft: EventDraft) -> CampusCalResult<Event> {
        self.local.create_event(draft).await
    }

    async fn set_event_status(&self, id: i64, status: EventStatus) -> CampusCalResult<Event> {
        self.local.set_event_status(id, status).await
    }
}

/// Reconcile a fresh remote listing with locally applied mutations.
///
/// Local-only events are kept, and a terminal local status is kept over a
/// still-pending remote one. Everything else is taken from the remote copy,
/// so server-side edits and decisions win where they exist.
fn merge_events(remote: Vec<Event>, local: Vec<Event>) -> Vec<Event> {
    let mut merged = remote;
    for local_event in local {
        match merged.iter_mut().find(|e| e.id == local_event.id) {
            Some(remote_event) => {
                if local_event.status.is_terminal() && !remote_event.status.is_terminal() {
                    remote_event.status = local_event.status;
                }
            }
            None => merged.push(local_event),
        }
    }
    merged
}

/// Audit sink for cache-only mode: recording is best-effort and simply
/// fails, listing reports a load failure rather than an empty trail.
pub struct OfflineAuditSink;

#[async_trait]
impl AuditSink for OfflineAuditSink {
    async fn record(&self, _action: AuditAction, _event_id: i64) -> CampusCalResult<()> {
        Err(CampusCalError::Remote(
            "no remote configured; audit entry not recorded".to_string(),
        ))
    }

    async fn list(&self) -> CampusCalResult<Vec<AuditLogEntry>> {
        Err(CampusCalError::Remote(
            "no remote configured; audit trail unavailable".to_string(),
        ))
    }
}
