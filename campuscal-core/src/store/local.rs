//! JSON-file event cache.
//!
//! One plain JSON object holds the event collection and the last known
//! profile, with no schema versioning:
//!
//! ```json
//! { "events": [...], "localProfile": {...} }
//! ```
//!
//! In cache-only mode this file is the store; in remote-backed mode it is a
//! best-effort mirror consulted when the remote is unreachable, overwritten
//! on every successful remote read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CampusCalError, CampusCalResult};
use crate::event::{Event, EventDraft, EventStatus};
use crate::profile::Profile;
use crate::store::EventStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default, rename = "localProfile", skip_serializing_if = "Option::is_none")]
    local_profile: Option<Profile>,
}

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        LocalStore { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> CampusCalResult<CacheFile> {
        if !self.path.exists() {
            return Ok(CacheFile::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    // Read-modify-write is not atomic; fine for a single process, known to
    // break if two processes write the same cache file concurrently.
    fn save(&self, cache: &CacheFile) -> CampusCalResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(cache)?)?;
        Ok(())
    }

    /// Overwrite the cached collection after a successful remote read.
    pub fn mirror_events(&self, events: &[Event]) -> CampusCalResult<()> {
        let mut cache = self.load()?;
        cache.events = events.to_vec();
        self.save(&cache)
    }

    pub fn cached_profile(&self) -> CampusCalResult<Option<Profile>> {
        Ok(self.load()?.local_profile)
    }

    /// Overwritten on every successful remote profile fetch.
    pub fn save_profile(&self, profile: &Profile) -> CampusCalResult<()> {
        let mut cache = self.load()?;
        cache.local_profile = Some(profile.clone());
        self.save(&cache)
    }
}

#[async_trait]
impl EventStore for LocalStore {
    async fn list_events(&self) -> CampusCalResult<Vec<Event>> {
        Ok(self.load()?.events)
    }

    async fn create_event(&self, draft: EventDraft) -> CampusCalResult<Event> {
        let mut cache = self.load()?;
        let event = draft.into_event()?;
        cache.events.push(event.clone());
        self.save(&cache)?;
        Ok(event)
    }

    async fn set_event_status(&self, id: i64, status: EventStatus) -> CampusCalResult<Event> {
        let mut cache = self.load()?;
        let Some(event) = cache.events.iter_mut().find(|e| e.id == id) else {
            return Err(CampusCalError::NotFound(id));
        };
        event.status = status;
        let updated = event.clone();
        self.save(&cache)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Role;
    use chrono::NaiveDate;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("store.json"));
        (dir, store)
    }

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_hour: "09:00".to_string(),
            end_hour: "11:00".to_string(),
            location: "Room 204".to_string(),
            course: "Distributed systems".to_string(),
            tutor: "T. Giang".to_string(),
            notes: "bring laptops".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let (_dir, store) = store();
        assert!(store.list_events().await.unwrap().is_empty());
        assert!(store.cached_profile().unwrap().is_none());
    }

    #[tokio::test]
    async fn created_events_round_trip() {
        let (_dir, store) = store();
        let created = store.create_event(draft("Seminar")).await.unwrap();
        assert_eq!(created.status, EventStatus::Pending);

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], created);

        // A double submit is two distinct events, not a dedup.
        store.create_event(draft("Seminar")).await.unwrap();
        assert_eq!(store.list_events().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn set_status_replaces_only_the_status() {
        let (_dir, store) = store();
        let created = store.create_event(draft("Seminar")).await.unwrap();

        let updated = store
            .set_event_status(created.id, EventStatus::Approved)
            .await
            .unwrap();
        assert_eq!(updated.status, EventStatus::Approved);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.notes, created.notes);

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].status, EventStatus::Approved);
    }

    #[tokio::test]
    async fn set_status_on_unknown_id_is_not_found() {
        let (_dir, store) = store();
        let err = store
            .set_event_status(999, EventStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, CampusCalError::NotFound(999)));
    }

    #[tokio::test]
    async fn cache_file_uses_the_expected_keys() {
        let (_dir, store) = store();
        store.create_event(draft("Seminar")).await.unwrap();
        store
            .save_profile(&Profile {
                username: "admin".to_string(),
                email: "admin@example.edu".to_string(),
                role: Role::Administrator,
                contact_number: None,
                recovery_email: None,
                major: None,
                class_name: None,
                courses: None,
            })
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("events").unwrap().is_array());
        assert!(value.get("localProfile").unwrap().is_object());
    }

    #[tokio::test]
    async fn mirror_overwrites_events_but_keeps_the_profile() {
        let (_dir, store) = store();
        store.create_event(draft("stale")).await.unwrap();
        store
            .save_profile(&Profile {
                username: "st01".to_string(),
                email: "st@example.edu".to_string(),
                role: Role::Student,
                contact_number: None,
                recovery_email: None,
                major: None,
                class_name: None,
                courses: None,
            })
            .unwrap();

        let fresh = draft("fresh").into_event().unwrap();
        store.mirror_events(std::slice::from_ref(&fresh)).unwrap();

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "fresh");
        assert_eq!(store.cached_profile().unwrap().unwrap().role, Role::Student);
    }
}
