//! Colored terminal rendering for homecal types.
//!
//! Extension traits and helpers that turn core values into owo_colors output.

use chrono::{NaiveDate, Weekday};
use chrono_tz::Tz;
use homecal_core::format;
use homecal_core::{Event, EventColor, LinkComment, SharedLink};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SharedLink {
    fn render(&self) -> String {
        let mut line = format!("{} {}", "🔗".dimmed(), self.title.bold());
        if !self.category.trim().is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", self.category).cyan()));
        }
        line.push_str(&format!("\n   {}", self.url.underline()));
        if !self.shared_by_name.is_empty() {
            line.push_str(&format!("\n   {}", format!("shared by {}", self.shared_by_name).dimmed()));
        }
        line.push_str(&format!("  {}", format!("({})", self.id).dimmed()));
        line
    }
}

impl Render for LinkComment {
    fn render(&self) -> String {
        format!("   {} {}", format!("{}:", self.author_name).bold(), self.message)
    }
}

/// A colored bullet in the event's color.
pub fn swatch(color: EventColor) -> String {
    "●".truecolor(color.red(), color.green(), color.blue()).to_string()
}

/// One line per event for lists: bullet, title, detail and id.
pub fn event_line(event: &Event, zone: Tz, default_color: EventColor) -> String {
    let mut line = format!(
        "{} {} {}",
        swatch(event.color_or(default_color)),
        event.to_string().bold(),
        format::detail_line(event, zone).dimmed()
    );
    if let Some(person) = &event.person_tag {
        line.push_str(&format!(" {}", format!("@{person}").cyan()));
    }
    if event.repeat_frequency.repeats() {
        line.push_str(&format!(" {}", format!("↻ {}", event.repeat_frequency).dimmed()));
    }
    line.push_str(&format!(" {}", format!("({})", event.id).dimmed()));
    line
}

/// A date label relative to `today`: "Today", "Tomorrow" or "Wed Feb 25".
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Two-letter weekday abbreviation for grid headers.
pub fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn relative_labels() {
        let today = date(2024, 3, 10);
        assert_eq!(date_label(today, today), "Today");
        assert_eq!(date_label(date(2024, 3, 11), today), "Tomorrow");
        assert_eq!(date_label(date(2024, 3, 13), today), "Wed Mar 13");
        assert_eq!(date_label(date(2024, 3, 9), today), "Sat Mar 9");
    }

    #[test]
    fn plural() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("event", 3), "events");
    }
}
