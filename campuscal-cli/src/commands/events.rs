use anyhow::Result;
use owo_colors::OwoColorize;

use campuscal_core::calendar::{StatusFilter, events_on_date};
use campuscal_core::store::EventStore;

use super::{parse_date, print_event};
use crate::AppContext;

pub async fn run(ctx: &AppContext, date: &str, all: bool) -> Result<()> {
    let date = parse_date(date)?;
    let events = ctx.store.list_events().await?;

    let filter = if all {
        StatusFilter::All
    } else {
        StatusFilter::ExcludeRejected
    };
    let mut list = events_on_date(date, &events, filter);
    list.sort_by(|a, b| a.start_hour.cmp(&b.start_hour));

    if list.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in list {
        print_event(event);
    }
    Ok(())
}
