use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use homecal_core::{DaySchedule, HourRow, format};
use owo_colors::OwoColorize;

use crate::render::{date_label, swatch};
use crate::session::Session;

pub fn run(session: &Session, date: Option<NaiveDate>, now: DateTime<Utc>) -> Result<()> {
    let today = now.with_timezone(&session.zone).date_naive();
    let date = date.unwrap_or(today);

    let events = session.events();
    let schedule = DaySchedule::build(&events, date, session.zone);

    println!(
        "{} {}",
        date_label(date, today).bold(),
        date.format("%Y-%m-%d").to_string().dimmed()
    );

    if schedule.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    for row in schedule.rows() {
        println!("{}", render_row(row, session));
    }

    Ok(())
}

fn render_row(row: &HourRow<'_>, session: &Session) -> String {
    let hour = format!("{:02}:00", row.hour).dimmed().to_string();

    let Some(primary) = row.primary else {
        return hour;
    };
    let event = primary.event;
    let bar = swatch(event.color_or(session.default_color));

    if !row.is_start_hour {
        return format!("{hour} {bar} {}", event.to_string().dimmed());
    }

    let mut line = format!(
        "{hour} {bar} {} {}",
        event.to_string().bold(),
        format::time_range_short(event, session.zone).dimmed()
    );
    if row.additional() > 0 {
        line.push_str(&format!(" {}", format!("+{} more", row.additional()).yellow()));
    }
    line
}
