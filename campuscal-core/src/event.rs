//! Scheduling event types.
//!
//! An `Event` is a proposed activity on the shared academic calendar. Events
//! are created as pending, then approved or rejected by a department
//! assistant or administrator. Everything but the status is fixed at
//! creation; the id never changes.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CampusCalError, CampusCalResult};

/// A proposed or confirmed scheduled activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned at creation, immutable afterwards.
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    /// Time of day as `HH:MM`.
    pub start_hour: String,
    pub end_hour: String,
    pub location: String,
    pub course: String,
    pub tutor: String,
    #[serde(default)]
    pub notes: String,
    /// Older records omit this field entirely; an absent status is pending.
    #[serde(default)]
    pub status: EventStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    /// Approved and rejected are terminal: no further transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, EventStatus::Pending)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

impl Event {
    /// Title for display; events with an empty title still render.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Creation payload. The store assigns the id and the pending status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_hour: String,
    pub end_hour: String,
    pub location: String,
    pub course: String,
    pub tutor: String,
    #[serde(default)]
    pub notes: String,
}

impl EventDraft {
    /// Turn the draft into a stored pending event.
    ///
    /// Ids are wall-clock milliseconds: unique enough for human-paced event
    /// creation, and a double submit intentionally creates two events.
    pub fn into_event(self) -> CampusCalResult<Event> {
        Ok(Event {
            id: Utc::now().timestamp_millis(),
            title: self.title,
            date: self.date,
            start_hour: normalize_hour(&self.start_hour)?,
            end_hour: normalize_hour(&self.end_hour)?,
            location: self.location,
            course: self.course,
            tutor: self.tutor,
            notes: self.notes,
            status: EventStatus::Pending,
        })
    }
}

/// Normalize a time-of-day string to `HH:MM`.
/// Accepts `9:00`, `09:00` and `09:00:00`.
pub fn normalize_hour(s: &str) -> CampusCalResult<String> {
    let s = s.trim();
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, format) {
            return Ok(t.format("%H:%M").to_string());
        }
    }
    Err(CampusCalError::Validation(format!(
        "Invalid time '{}'. Expected HH:MM",
        s
    )))
}
