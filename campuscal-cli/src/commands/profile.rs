use anyhow::Result;
use owo_colors::OwoColorize;

use crate::{AppContext, require_profile};

pub async fn run(ctx: &AppContext) -> Result<()> {
    let profile = require_profile(ctx).await?;

    println!("{} <{}>", profile.username.bold(), profile.email);
    println!("Role: {}", profile.role);
    if let Some(contact) = &profile.contact_number {
        println!("Contact: {}", contact);
    }
    if let Some(recovery) = &profile.recovery_email {
        println!("Recovery email: {}", recovery);
    }
    if let Some(major) = &profile.major {
        println!("Major: {}", major);
    }
    if let Some(class_name) = &profile.class_name {
        println!("Class: {}", class_name);
    }
    if let Some(courses) = &profile.courses {
        if !courses.is_empty() {
            println!("Courses: {}", courses.join(", "));
        }
    }

    println!();
    println!("Create events:  {}", yes_no(profile.role.can_create_events()));
    println!("Approve events: {}", yes_no(profile.role.can_approve_events()));
    println!("Audit trail:    {}", yes_no(profile.role.can_view_audit()));
    Ok(())
}

fn yes_no(allowed: bool) -> String {
    if allowed {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}
