use anyhow::Result;
use owo_colors::OwoColorize;

use crate::{AppContext, require_profile};

#[derive(Debug, Clone, Copy)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn run(ctx: &AppContext, id: i64, decision: Decision) -> Result<()> {
    let profile = require_profile(ctx).await?;

    let event = match decision {
        Decision::Approve => ctx.manager.approve(&profile, id).await?,
        Decision::Reject => ctx.manager.reject(&profile, id).await?,
    };

    let verdict = match decision {
        Decision::Approve => "Approved".green().bold().to_string(),
        Decision::Reject => "Rejected".red().bold().to_string(),
    };
    println!("{} {} (id {})", verdict, event.display_title(), event.id);
    println!(
        "{}",
        format!("{} · {} - {}", event.date, event.start_hour, event.end_hour).dimmed()
    );
    Ok(())
}
