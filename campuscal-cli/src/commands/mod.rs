pub mod approve;
pub mod audit;
pub mod calendar;
pub mod create;
pub mod events;
pub mod export;
pub mod pending;
pub mod profile;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use campuscal_core::event::{Event, EventStatus};

/// Audit entries shown per page.
pub const AUDIT_PAGE_SIZE: usize = 10;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Parse YYYY-MM as the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", s))
}

/// Two-line event listing shared by the list commands.
pub fn print_event(event: &Event) {
    let status = match event.status {
        EventStatus::Pending => "pending".yellow().to_string(),
        EventStatus::Approved => "approved".green().to_string(),
        EventStatus::Rejected => "rejected".red().to_string(),
    };
    println!(
        "{}  {} - {}  {} [{}]",
        event.date,
        event.start_hour,
        event.end_hour,
        event.display_title().bold(),
        status
    );
    let details = format!(
        "id {} · {} · {} · {}",
        event.id, event.location, event.course, event.tutor
    );
    println!("    {}", details.dimmed());
    if !event.notes.is_empty() {
        println!("    {}", event.notes.dimmed());
    }
}
