use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use campuscal_core::config::{CampusCalConfig, TOKEN_ENV};

use super::parse_date;
use crate::AppContext;
use crate::client::validate_export_bounds;

pub async fn run(ctx: &AppContext, start: Option<&str>, end: Option<&str>) -> Result<()> {
    let Some(remote) = &ctx.remote else {
        anyhow::bail!(
            "Export needs the remote calendar service.\n\n\
            Set {} in the environment or `token` in {}.",
            TOKEN_ENV,
            CampusCalConfig::config_path()?.display()
        );
    };

    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;
    // Validate here too so the filename can be built from checked bounds.
    let (start, end) = validate_export_bounds(start, end)?;

    let bytes = remote.export_events(Some(start), Some(end)).await?;

    let filename = export_filename(start, end);
    std::fs::write(&filename, &bytes)?;
    println!(
        "{} {} ({} bytes)",
        "Saved".green().bold(),
        filename,
        bytes.len()
    );
    Ok(())
}

fn export_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("calendar_export_{start}_{end}.csv")
}
