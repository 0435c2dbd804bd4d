use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use homecal_core::constants::MONTH_CELL_PREVIEW;
use homecal_core::{EventIndex, GridCell, MonthGrid, YearMonth, format};
use owo_colors::OwoColorize;

use crate::render::{date_label, swatch, weekday_short};
use crate::session::Session;

const CELL_WIDTH: usize = 6;

pub fn run(session: &Session, month: Option<YearMonth>, now: DateTime<Utc>) -> Result<()> {
    let today = now.with_timezone(&session.zone).date_naive();
    let year_month = month.unwrap_or_else(|| YearMonth::from_date(today));

    let events = session.events();
    let index = EventIndex::build(&events, session.zone);
    let grid = MonthGrid::new(year_month, session.first_day);

    println!("{}", year_month.to_string().bold());
    let header: Vec<String> = grid
        .header()
        .iter()
        .map(|d| format!("{:<width$}", weekday_short(*d), width = CELL_WIDTH))
        .collect();
    println!("{}", header.concat().dimmed());

    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| render_cell(*cell, &index, today))
            .collect();
        println!("{}", line.concat());
    }

    let days = index.month(year_month);
    if days.is_empty() {
        println!("\n{}", "No events this month".dimmed());
        return Ok(());
    }

    for (date, _) in days {
        println!("\n{}", date_label(date, today).bold());

        let preview = index.day_preview(date, MONTH_CELL_PREVIEW);
        for event in preview.shown {
            println!(
                "  {} {:>13} {}",
                swatch(event.color_or(session.default_color)),
                format::time_range_short(event, session.zone),
                event
            );
        }
        if preview.more > 0 {
            println!("  {}", format!("+{} more", preview.more).dimmed());
        }
    }

    Ok(())
}

/// Day number plus event count, padded to the cell width before coloring.
fn cell_text(cell: GridCell, index: &EventIndex) -> String {
    match cell {
        GridCell::Empty => " ".repeat(CELL_WIDTH),
        GridCell::Date(date) => {
            let count = index.day(date).len();
            let marker = match count {
                0 => String::new(),
                n if n > 9 => "•+".to_string(),
                n => format!("•{n}"),
            };
            format!("{:>2}{:<width$}", date.day(), marker, width = CELL_WIDTH - 2)
        }
    }
}

fn render_cell(cell: GridCell, index: &EventIndex, today: NaiveDate) -> String {
    let text = cell_text(cell, index);
    match cell.date() {
        Some(date) if date == today => text.reversed().to_string(),
        Some(date) if index.has_events(date) => text.bold().to_string(),
        _ => text,
    }
}
