use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use homecal_core::{format, upcoming};
use owo_colors::OwoColorize;

use crate::render::{date_label, swatch};
use crate::session::Session;

pub fn run(session: &Session, limit: Option<usize>, now: DateTime<Utc>) -> Result<()> {
    let today = now.with_timezone(&session.zone).date_naive();
    let mut events = upcoming(&session.events(), now);
    if let Some(limit) = limit {
        events.truncate(limit);
    }

    if events.is_empty() {
        println!("{}", "No upcoming events".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        let date = event.start_date(session.zone);

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(date, today).bold());
            current_date = Some(date);
        }

        let mut line = format!(
            "  {} {:>13} {}",
            swatch(event.color_or(session.default_color)),
            format::time_range_short(event, session.zone),
            event
        );
        if let Some(person) = &event.person_tag {
            line.push_str(&format!(" {}", format!("@{person}").cyan()));
        }
        println!("{line}");
    }

    Ok(())
}
