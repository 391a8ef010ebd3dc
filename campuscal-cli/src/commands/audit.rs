use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use super::AUDIT_PAGE_SIZE;
use crate::{AppContext, require_profile};

pub async fn run(ctx: &AppContext, page: usize) -> Result<()> {
    let profile = require_profile(ctx).await?;
    // Non-administrators get an explicit denial here, never an empty list.
    let logs = ctx.manager.audit_trail(&profile).await?;

    if logs.is_empty() {
        println!("{}", "No audit logs yet.".dimmed());
        return Ok(());
    }

    let page = page.max(1);
    let pages = logs.len().div_ceil(AUDIT_PAGE_SIZE);
    if page > pages {
        anyhow::bail!("Page {} is out of range (1-{})", page, pages);
    }

    let offset = (page - 1) * AUDIT_PAGE_SIZE;
    for entry in logs.iter().skip(offset).take(AUDIT_PAGE_SIZE) {
        let stamp = entry.timestamp.with_timezone(&Local);
        println!(
            "{}  {}  {}",
            entry.action.bold(),
            entry.user_email,
            stamp.format("%H:%M %d/%m/%Y").to_string().dimmed()
        );
        if !entry.event_details.is_empty() {
            println!("    {}", entry.event_details.dimmed());
        }
    }

    let shown_to = (offset + AUDIT_PAGE_SIZE).min(logs.len());
    println!();
    println!(
        "{}",
        format!(
            "Showing {}-{} of {} logs (page {}/{})",
            offset + 1,
            shown_to,
            logs.len(),
            page,
            pages
        )
        .dimmed()
    );
    Ok(())
}
