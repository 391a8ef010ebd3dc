use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use owo_colors::OwoColorize;

use campuscal_core::calendar::{MonthView, StatusFilter, events_on_date, has_events_on};
use campuscal_core::event::Event;
use campuscal_core::store::EventStore;

use super::{parse_date, parse_month};
use crate::AppContext;

const WEEKDAY_LETTERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub async fn run(ctx: &AppContext, month: Option<&str>, date: Option<&str>) -> Result<()> {
    let anchor = match month {
        Some(m) => parse_month(m)?,
        None => Local::now().date_naive(),
    };
    let mut view = MonthView::new(anchor);
    if let Some(d) = date {
        view.select(parse_date(d)?);
    }

    let events = ctx.store.list_events().await?;

    println!("{}", view.anchor().format("%B %Y").to_string().bold());
    let header: Vec<String> = WEEKDAY_LETTERS.iter().map(|w| format!("{:>3}", w)).collect();
    println!("{}", header.join(" ").dimmed());

    for week in view.grid().chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|day| format_day(*day, &view, &events))
            .collect();
        println!("{}", row.join(" "));
    }

    match view.selected() {
        Some(selected) => {
            println!();
            println!("{}", format!("Events on {}", selected).bold());
            let list = events_on_date(selected, &events, StatusFilter::ApprovedOnly);
            if list.is_empty() {
                println!("{}", "No approved events for this date.".dimmed());
            } else {
                for event in list {
                    println!(
                        "  {} - {}  {}  {}",
                        event.start_hour,
                        event.end_hour,
                        event.display_title(),
                        event.location.dimmed()
                    );
                    if !event.notes.is_empty() {
                        println!("    {}", event.notes.dimmed());
                    }
                }
            }
        }
        None => {
            println!();
            println!(
                "{}",
                "Pass --date YYYY-MM-DD to list a day's approved events.".dimmed()
            );
        }
    }

    Ok(())
}

/// One grid cell: selected dates are highlighted, days with approved events
/// are marked, overflow days from adjacent months are dimmed but present.
fn format_day(day: NaiveDate, view: &MonthView, events: &[Event]) -> String {
    let cell = format!("{:>3}", day.day());

    if view.selected() == Some(day) {
        return cell.reversed().to_string();
    }
    if has_events_on(day, events, StatusFilter::ApprovedOnly) {
        cell.green().bold().to_string()
    } else if view.in_month(day) {
        cell
    } else {
        cell.dimmed().to_string()
    }
}
