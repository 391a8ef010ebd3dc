use anyhow::Result;
use owo_colors::OwoColorize;

use campuscal_core::event::EventDraft;

use super::parse_date;
use crate::{AppContext, require_profile};

pub struct CreateArgs {
    pub title: String,
    pub date: String,
    pub from: String,
    pub to: String,
    pub location: String,
    pub course: String,
    pub tutor: String,
    pub notes: Option<String>,
}

pub async fn run(ctx: &AppContext, args: CreateArgs) -> Result<()> {
    let profile = require_profile(ctx).await?;

    let draft = EventDraft {
        title: args.title,
        date: parse_date(&args.date)?,
        start_hour: args.from,
        end_hour: args.to,
        location: args.location,
        course: args.course,
        tutor: args.tutor,
        notes: args.notes.unwrap_or_default(),
    };

    let event = ctx.manager.create_event(&profile, draft).await?;

    println!(
        "{} {} (id {})",
        "Created".green().bold(),
        event.display_title(),
        event.id
    );
    println!(
        "{}",
        format!(
            "{} · {} - {} · sent for approval",
            event.date, event.start_hour, event.end_hour
        )
        .dimmed()
    );
    Ok(())
}
