//! Role gating and event lifecycle transitions.
//!
//! The manager is the single authorization gate: every entry point that can
//! mutate event state goes through it, and the store does not re-check
//! roles. Each successful mutation records one audit entry (best-effort)
//! and broadcasts one change notification, in that order, after the store
//! write has been applied.

use std::sync::Arc;

use tracing::warn;

use crate::audit::{AuditAction, AuditLogEntry, AuditSink, sort_newest_first};
use crate::error::{CampusCalError, CampusCalResult};
use crate::event::{Event, EventDraft, EventStatus};
use crate::notify::{ChangeNotifier, StoreChange};
use crate::profile::{Profile, Role};
use crate::store::EventStore;

impl Role {
    /// May propose new events.
    pub fn can_create_events(self) -> bool {
        matches!(self, Role::AcademicAssistant | Role::Administrator)
    }

    /// May approve or reject pending events.
    pub fn can_approve_events(self) -> bool {
        matches!(self, Role::DepartmentAssistant | Role::Administrator)
    }

    /// May read the audit trail.
    pub fn can_view_audit(self) -> bool {
        matches!(self, Role::Administrator)
    }
}

pub struct LifecycleManager {
    store: Arc<dyn EventStore>,
    audit: Arc<dyn AuditSink>,
    notifier: ChangeNotifier,
}

impl LifecycleManager {
    pub fn new(
        store: Arc<dyn EventStore>,
        audit: Arc<dyn AuditSink>,
        notifier: ChangeNotifier,
    ) -> Self {
        LifecycleManager {
            store,
            audit,
            notifier,
        }
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub async fn create_event(
        &self,
        profile: &Profile,
        draft: EventDraft,
    ) -> CampusCalResult<Event> {
        if !profile.role.can_create_events() {
            return Err(CampusCalError::AccessDenied(format!(
                "role '{}' may not create events",
                profile.role
            )));
        }

        let event = self.store.create_event(draft).await?;
        self.record(AuditAction::CreateEvent, event.id).await;
        self.notifier.notify(StoreChange::Created { id: event.id });
        Ok(event)
    }

    pub async fn approve(&self, profile: &Profile, id: i64) -> CampusCalResult<Event> {
        self.transition(profile, id, EventStatus::Approved, AuditAction::ApproveEvent)
            .await
    }

    pub async fn reject(&self, profile: &Profile, id: i64) -> CampusCalResult<Event> {
        self.transition(profile, id, EventStatus::Rejected, AuditAction::RejectEvent)
            .await
    }

    async fn transition(
        &self,
        profile: &Profile,
        id: i64,
        status: EventStatus,
        action: AuditAction,
    ) -> CampusCalResult<Event> {
        // Denial short-circuits before any store or network access.
        if !profile.role.can_approve_events() {
            return Err(CampusCalError::AccessDenied(format!(
                "role '{}' may not approve or reject events",
                profile.role
            )));
        }

        // Reread right before the write: terminal states stay terminal.
        // Two racing approvers can still interleave here; last write wins.
        let events = self.store.list_events().await?;
        let current = events
            .iter()
            .find(|e| e.id == id)
            .ok_or(CampusCalError::NotFound(id))?;
        if current.status.is_terminal() {
            return Err(CampusCalError::StateConflict {
                id,
                status: current.status,
            });
        }

        let updated = self.store.set_event_status(id, status).await?;
        self.record(action, id).await;
        self.notifier
            .notify(StoreChange::StatusChanged { id, status });
        Ok(updated)
    }

    /// The full audit trail, newest first. Administrators only; everyone
    /// else gets an explicit denial rather than an empty list.
    pub async fn audit_trail(&self, profile: &Profile) -> CampusCalResult<Vec<AuditLogEntry>> {
        if !profile.role.can_view_audit() {
            return Err(CampusCalError::AccessDenied(format!(
                "role '{}' may not view the audit trail",
                profile.role
            )));
        }
        let mut entries = self.audit.list().await?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Best-effort append; a failed record never fails the transition.
    async fn record(&self, action: AuditAction, event_id: i64) {
        if let Err(err) = self.audit.record(action, event_id).await {
            warn!(%action, event_id, %err, "audit record failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;

    struct MemAuditSink {
        entries: Mutex<Vec<(AuditAction, i64)>>,
        fail_record: bool,
    }

    impl MemAuditSink {
        fn new() -> Self {
            MemAuditSink {
                entries: Mutex::new(Vec::new()),
                fail_record: false,
            }
        }

        fn failing() -> Self {
            MemAuditSink {
                entries: Mutex::new(Vec::new()),
                fail_record: true,
            }
        }

        fn recorded(&self) -> Vec<(AuditAction, i64)> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuditSink for MemAuditSink {
        async fn record(&self, action: AuditAction, event_id: i64) -> CampusCalResult<()> {
            if self.fail_record {
                return Err(CampusCalError::Remote("audit backend down".to_string()));
            }
            self.entries.lock().unwrap().push((action, event_id));
            Ok(())
        }

        async fn list(&self) -> CampusCalResult<Vec<AuditLogEntry>> {
            let entries = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .enumerate()
                .map(|(i, (action, event_id))| AuditLogEntry {
                    id: i as i64,
                    user_email: "admin@example.edu".to_string(),
                    action: action.to_string(),
                    event_details: format!("event {}", event_id),
                    timestamp: Utc::now() + chrono::Duration::seconds(i as i64),
                })
                .collect();
            Ok(entries)
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Arc<LocalStore>,
        audit: Arc<MemAuditSink>,
        manager: LifecycleManager,
    }

    fn fixture_with(audit: MemAuditSink) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::new(dir.path().join("store.json")));
        let audit = Arc::new(audit);
        let manager = LifecycleManager::new(
            store.clone(),
            audit.clone(),
            ChangeNotifier::new(),
        );
        Fixture {
            _dir: dir,
            store,
            audit,
            manager,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MemAuditSink::new())
    }

    fn profile(role: Role) -> Profile {
        Profile {
            username: format!("{}-user", role),
            email: format!("{}@example.edu", role),
            role,
            contact_number: None,
            recovery_email: None,
            major: None,
            class_name: None,
            courses: None,
        }
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Seminar".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_hour: "09:00".to_string(),
            end_hour: "11:00".to_string(),
            location: "Room 204".to_string(),
            course: "Distributed systems".to_string(),
            tutor: "T. Giang".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn role_gating_truth_table() {
        for role in Role::ALL {
            assert_eq!(
                role.can_create_events(),
                matches!(role, Role::AcademicAssistant | Role::Administrator),
                "create rights for {role}"
            );
            assert_eq!(
                role.can_approve_events(),
                matches!(role, Role::DepartmentAssistant | Role::Administrator),
                "approve rights for {role}"
            );
            assert_eq!(
                role.can_view_audit(),
                matches!(role, Role::Administrator),
                "audit rights for {role}"
            );
        }
    }

    #[tokio::test]
    async fn create_records_audit_and_notifies() {
        let fx = fixture();
        let mut rx = fx.manager.notifier().subscribe();

        let event = fx
            .manager
            .create_event(&profile(Role::AcademicAssistant), draft())
            .await
            .unwrap();
        assert_eq!(event.status, EventStatus::Pending);

        assert_eq!(fx.audit.recorded(), vec![(AuditAction::CreateEvent, event.id)]);
        assert_eq!(rx.try_recv().unwrap(), StoreChange::Created { id: event.id });
        // The mutation was applied before the notification went out.
        let stored = fx.store.list_events().await.unwrap();
        assert!(stored.iter().any(|e| e.id == event.id));
    }

    #[tokio::test]
    async fn create_denied_for_unprivileged_roles() {
        let fx = fixture();
        for role in [Role::Student, Role::DepartmentAssistant] {
            let err = fx
                .manager
                .create_event(&profile(role), draft())
                .await
                .unwrap_err();
            assert!(matches!(err, CampusCalError::AccessDenied(_)));
        }
        assert!(fx.store.list_events().await.unwrap().is_empty());
        assert!(fx.audit.recorded().is_empty());
    }

    #[tokio::test]
    async fn approve_then_approve_again_is_a_state_conflict() {
        let fx = fixture();
        let daa = profile(Role::DepartmentAssistant);
        let event = fx
            .manager
            .create_event(&profile(Role::Administrator), draft())
            .await
            .unwrap();

        let approved = fx.manager.approve(&daa, event.id).await.unwrap();
        assert_eq!(approved.status, EventStatus::Approved);

        let err = fx.manager.approve(&daa, event.id).await.unwrap_err();
        assert!(matches!(
            err,
            CampusCalError::StateConflict {
                status: EventStatus::Approved,
                ..
            }
        ));
        // The stored status is unchanged by the rejected call.
        let stored = fx.store.list_events().await.unwrap();
        assert_eq!(stored[0].status, EventStatus::Approved);

        let err = fx.manager.reject(&daa, event.id).await.unwrap_err();
        assert!(matches!(err, CampusCalError::StateConflict { .. }));
    }

    #[tokio::test]
    async fn reject_is_terminal_too() {
        let fx = fixture();
        let daa = profile(Role::DepartmentAssistant);
        let event = fx
            .manager
            .create_event(&profile(Role::Administrator), draft())
            .await
            .unwrap();

        fx.manager.reject(&daa, event.id).await.unwrap();
        let err = fx.manager.approve(&daa, event.id).await.unwrap_err();
        assert!(matches!(
            err,
            CampusCalError::StateConflict {
                status: EventStatus::Rejected,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transition_on_unknown_id_leaves_no_trace() {
        let fx = fixture();
        let mut rx = fx.manager.notifier().subscribe();

        let err = fx
            .manager
            .approve(&profile(Role::DepartmentAssistant), 999)
            .await
            .unwrap_err();
        assert!(matches!(err, CampusCalError::NotFound(999)));
        assert!(fx.audit.recorded().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn approval_denied_before_touching_the_store() {
        let fx = fixture();
        let event = fx
            .manager
            .create_event(&profile(Role::Administrator), draft())
            .await
            .unwrap();

        for role in [Role::Student, Role::AcademicAssistant] {
            let err = fx.manager.approve(&profile(role), event.id).await.unwrap_err();
            assert!(matches!(err, CampusCalError::AccessDenied(_)));
        }
        let stored = fx.store.list_events().await.unwrap();
        assert_eq!(stored[0].status, EventStatus::Pending);
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_the_transition() {
        let fx = fixture_with(MemAuditSink::failing());
        let mut rx = fx.manager.notifier().subscribe();

        let event = fx
            .manager
            .create_event(&profile(Role::Administrator), draft())
            .await
            .unwrap();
        let approved = fx
            .manager
            .approve(&profile(Role::DepartmentAssistant), event.id)
            .await
            .unwrap();
        assert_eq!(approved.status, EventStatus::Approved);

        // Notifications still went out even though auditing was down.
        assert_eq!(rx.try_recv().unwrap(), StoreChange::Created { id: event.id });
        assert!(matches!(
            rx.try_recv().unwrap(),
            StoreChange::StatusChanged { .. }
        ));
    }

    #[tokio::test]
    async fn audit_trail_is_admin_only_and_newest_first() {
        let fx = fixture();
        let admin = profile(Role::Administrator);
        let event = fx.manager.create_event(&admin, draft()).await.unwrap();
        fx.manager.approve(&admin, event.id).await.unwrap();

        for role in [Role::Student, Role::AcademicAssistant, Role::DepartmentAssistant] {
            let err = fx.manager.audit_trail(&profile(role)).await.unwrap_err();
            assert!(matches!(err, CampusCalError::AccessDenied(_)));
        }

        let trail = fx.manager.audit_trail(&admin).await.unwrap();
        assert_eq!(trail.len(), 2);
        assert!(trail[0].timestamp >= trail[1].timestamp);
        assert_eq!(trail[0].action, "approveEvent");
        assert_eq!(trail[1].action, "createEvent");
    }
}
