use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::Args;
use homecal_core::store::EventStore;
use homecal_core::{CoreError, EventColor, EventDraft, RepeatFrequency};
use owo_colors::OwoColorize;

use crate::render::event_line;
use crate::session::Session;

/// Event fields shared by `add` and `edit`. Unset flags leave the draft alone.
#[derive(Args, Debug, Default, Clone)]
pub struct EventArgs {
    /// Date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Start time (HH:MM)
    #[arg(short, long, value_parser = parse_time, conflicts_with = "all_day")]
    pub start: Option<NaiveTime>,

    /// End time (HH:MM)
    #[arg(short, long, value_parser = parse_time, conflicts_with = "all_day")]
    pub end: Option<NaiveTime>,

    /// Make this an all-day event
    #[arg(long)]
    pub all_day: bool,

    /// daily, weekly, monthly, yearly or none
    #[arg(short, long)]
    pub repeat: Option<RepeatFrequency>,

    /// Color as #RRGGBB or #AARRGGBB
    #[arg(short, long)]
    pub color: Option<EventColor>,

    #[arg(short, long)]
    pub notes: Option<String>,

    /// Who the event is for
    #[arg(short, long)]
    pub person: Option<String>,
}

impl EventArgs {
    /// Copy every given flag onto `draft`. Giving a start or end time makes
    /// the event timed again.
    pub fn apply(&self, draft: &mut EventDraft) {
        if let Some(date) = self.date {
            draft.date = date;
        }
        if self.all_day {
            draft.all_day = true;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
            draft.all_day = false;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
            draft.all_day = false;
        }
        if let Some(repeat) = self.repeat {
            draft.repeat_frequency = repeat;
        }
        if let Some(color) = self.color {
            draft.color_argb = color.argb();
        }
        if let Some(notes) = &self.notes {
            draft.notes = Some(notes.clone());
        }
        if let Some(person) = &self.person {
            draft.person_tag = Some(person.clone());
        }
    }
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("Invalid time '{s}'. Expected HH:MM"))
}

pub fn add(session: &Session, title: String, args: &EventArgs, today: NaiveDate) -> Result<()> {
    let mut draft = EventDraft::new(args.date.unwrap_or(today));
    draft.title = title;
    args.apply(&mut draft);

    let event = draft.build(session.zone, session.default_color)?;
    let stored = session.store.upsert_event(&session.profile, event)?;
    session.save()?;

    println!(
        "{} {}",
        "Added".green(),
        event_line(&stored, session.zone, session.default_color)
    );
    Ok(())
}

pub fn edit(session: &Session, id: &str, title: Option<String>, args: &EventArgs) -> Result<()> {
    let existing = session
        .find_event(id)
        .ok_or_else(|| CoreError::EventNotFound(id.to_string()))?;

    let mut draft = EventDraft::edit(&existing, session.zone);
    if let Some(title) = title {
        draft.title = title;
    }
    args.apply(&mut draft);

    let event = draft.build(session.zone, session.default_color)?;
    let stored = session
        .store
        .upsert_event(&session.profile, event)
        .with_context(|| format!("Failed to update event {id}"))?;
    session.save()?;

    println!(
        "{} {}",
        "Updated".yellow(),
        event_line(&stored, session.zone, session.default_color)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_clock_times() {
        assert_eq!(parse_time("09:30"), Ok(hm(9, 30)));
        assert_eq!(parse_time(" 23:05 "), Ok(hm(23, 5)));
        assert!(parse_time("9.30").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn unset_flags_keep_draft() {
        let mut draft = EventDraft::new(date(2024, 3, 10));
        draft.notes = Some("bring forms".into());
        let before = draft.clone();

        EventArgs::default().apply(&mut draft);
        assert_eq!(draft, before);
    }

    #[test]
    fn times_make_event_timed() {
        let mut draft = EventDraft::new(date(2024, 3, 10));
        draft.all_day = true;

        let args = EventArgs {
            start: Some(hm(14, 0)),
            end: Some(hm(15, 30)),
            repeat: Some(RepeatFrequency::Weekly),
            color: Some(EventColor(0xFF00_897B)),
            person: Some("Anna".into()),
            ..EventArgs::default()
        };
        args.apply(&mut draft);

        assert!(!draft.all_day);
        assert_eq!(draft.start_time, hm(14, 0));
        assert_eq!(draft.end_time, hm(15, 30));
        assert_eq!(draft.repeat_frequency, RepeatFrequency::Weekly);
        assert_eq!(draft.color_argb, 0xFF00_897B);
        assert_eq!(draft.person_tag.as_deref(), Some("Anna"));
    }

    #[test]
    fn all_day_flag_and_date() {
        let mut draft = EventDraft::new(date(2024, 3, 10));
        let args = EventArgs {
            date: Some(date(2024, 3, 12)),
            all_day: true,
            ..EventArgs::default()
        };
        args.apply(&mut draft);

        assert!(draft.all_day);
        assert_eq!(draft.date, date(2024, 3, 12));
    }
}
