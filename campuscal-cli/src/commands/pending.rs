use anyhow::Result;
use owo_colors::OwoColorize;

use campuscal_core::event::EventStatus;
use campuscal_core::store::EventStore;

use super::print_event;
use crate::AppContext;

/// The approver's worklist: everything still awaiting a decision.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let events = ctx.store.list_events().await?;
    let mut pending: Vec<_> = events
        .iter()
        .filter(|e| e.status == EventStatus::Pending)
        .collect();
    pending.sort_by(|a, b| (a.date, &a.start_hour).cmp(&(b.date, &b.start_hour)));

    if pending.is_empty() {
        println!("{}", "No pending events.".dimmed());
        return Ok(());
    }

    let count = pending.len();
    for event in pending {
        print_event(event);
    }
    println!();
    println!(
        "{}",
        format!(
            "{} event(s) awaiting a decision. Use `campuscal approve <id>` or `campuscal reject <id>`.",
            count
        )
        .dimmed()
    );
    Ok(())
}
