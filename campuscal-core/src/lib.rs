//! Core types and engine for the campuscal scheduling tool.
//!
//! This crate holds everything the front ends share:
//! - `event` / `profile` / `audit` for the data model
//! - `lifecycle` for role gating and status transitions
//! - `calendar` for the month grid and per-date aggregation
//! - `store` for the event store port and the local cache
//! - `notify` for the in-process change broadcast

pub mod audit;
pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod notify;
pub mod profile;
pub mod store;

// Re-export the most common types at crate root for convenience
pub use error::{CampusCalError, CampusCalResult};
pub use event::{Event, EventDraft, EventStatus};
pub use profile::{Profile, Role};
