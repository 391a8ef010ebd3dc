//! Month grid construction and per-date event aggregation.
//!
//! The month view is a fixed 6x7 window: the Sunday on or before the 1st,
//! then 42 consecutive days. Overflow days from adjacent months are part of
//! the grid, selectable, and still checked for events.

use chrono::{Datelike, Duration, NaiveDate};

use crate::event::{Event, EventStatus};

pub const GRID_WEEKS: usize = 6;
pub const GRID_DAYS: usize = GRID_WEEKS * 7;

/// The 42-day window for the month containing `anchor`, in ascending order.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = anchor.with_day(1).unwrap();
    let offset = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(offset);

    (0..GRID_DAYS as i64)
        .map(|d| start + Duration::days(d))
        .collect()
}

/// Status filtering applied when listing events for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Everything, including rejected events.
    All,
    /// Default list views: hide rejected, keep pending.
    ExcludeRejected,
    /// The shared calendar: approved events only.
    ApprovedOnly,
}

impl StatusFilter {
    pub fn matches(self, status: EventStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::ExcludeRejected => status != EventStatus::Rejected,
            StatusFilter::ApprovedOnly => status == EventStatus::Approved,
        }
    }
}

/// Events falling on `date`, matched by exact calendar date.
pub fn events_on_date<'a>(
    date: NaiveDate,
    events: &'a [Event],
    filter: StatusFilter,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.date == date && filter.matches(e.status))
        .collect()
}

/// Whether any event passing `filter` falls on `date`. Used for day markers.
pub fn has_events_on(date: NaiveDate, events: &[Event], filter: StatusFilter) -> bool {
    events
        .iter()
        .any(|e| e.date == date && filter.matches(e.status))
}

/// Month navigation and single-date selection state.
///
/// Navigation moves only the anchor; the event collection is held by the
/// caller and re-filtered locally, so neither navigation nor selection
/// triggers a fetch.
#[derive(Debug, Clone)]
pub struct MonthView {
    anchor: NaiveDate,
    selected: Option<NaiveDate>,
}

impl MonthView {
    pub fn new(anchor: NaiveDate) -> Self {
        MonthView {
            anchor: anchor.with_day(1).unwrap(),
            selected: None,
        }
    }

    /// First day of the displayed month.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn grid(&self) -> Vec<NaiveDate> {
        month_grid(self.anchor)
    }

    /// False for the leading/trailing overflow days of adjacent months.
    pub fn in_month(&self, date: NaiveDate) -> bool {
        date.year() == self.anchor.year() && date.month() == self.anchor.month()
    }

    pub fn previous_month(&mut self) {
        self.anchor = (self.anchor - Duration::days(1)).with_day(1).unwrap();
    }

    pub fn next_month(&mut self) {
        // Day 1 plus 32 days always lands in the following month.
        self.anchor = (self.anchor + Duration::days(32)).with_day(1).unwrap();
    }

    /// At most one date selected at a time. Overflow days are selectable too.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
