//! The household event record.
//!
//! Events carry absolute instants as epoch milliseconds, exactly as the
//! document store holds them. Local dates only appear when a caller supplies
//! a zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::color::EventColor;
use crate::error::CoreError;
use crate::time;

/// A single calendar event (one occurrence).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Empty until the store assigns one.
    pub id: String,
    pub title: String,
    pub start_epoch_millis: i64,
    pub end_epoch_millis: i64,
    pub all_day: bool,
    pub repeat_frequency: RepeatFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Packed ARGB; zero means "use the caller's default".
    pub color_argb: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_tag: Option<String>,
}

/// How often an event is meant to repeat.
///
/// Stored and shown, never expanded into further occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatFrequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatFrequency {
    /// The options a user can pick when turning repeat on.
    pub fn choices() -> [RepeatFrequency; 4] {
        [
            RepeatFrequency::Daily,
            RepeatFrequency::Weekly,
            RepeatFrequency::Monthly,
            RepeatFrequency::Yearly,
        ]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RepeatFrequency::None => "Does not repeat",
            RepeatFrequency::Daily => "Daily",
            RepeatFrequency::Weekly => "Weekly",
            RepeatFrequency::Monthly => "Monthly",
            RepeatFrequency::Yearly => "Yearly",
        }
    }

    pub fn repeats(self) -> bool {
        self != RepeatFrequency::None
    }
}

impl fmt::Display for RepeatFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RepeatFrequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "never" => Ok(RepeatFrequency::None),
            "daily" => Ok(RepeatFrequency::Daily),
            "weekly" => Ok(RepeatFrequency::Weekly),
            "monthly" => Ok(RepeatFrequency::Monthly),
            "yearly" => Ok(RepeatFrequency::Yearly),
            _ => Err(CoreError::InvalidRepeat(s.to_string())),
        }
    }
}

impl Event {
    /// A timed event between two instants.
    pub fn timed(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Event {
            title: title.into(),
            start_epoch_millis: start.timestamp_millis(),
            end_epoch_millis: end.timestamp_millis(),
            ..Event::default()
        }
    }

    /// An all-day event covering `date` in `zone`.
    pub fn all_day(title: impl Into<String>, date: NaiveDate, zone: Tz) -> Self {
        Self::all_day_span(title, date, date, zone)
    }

    /// An all-day event covering `first` through `last` (inclusive) in `zone`.
    pub fn all_day_span(
        title: impl Into<String>,
        first: NaiveDate,
        last: NaiveDate,
        zone: Tz,
    ) -> Self {
        Event {
            title: title.into(),
            start_epoch_millis: time::start_of_day_millis(first, zone),
            end_epoch_millis: time::end_of_day_millis(last, zone),
            all_day: true,
            ..Event::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.person_tag = Some(person.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color_argb = color.argb();
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatFrequency) -> Self {
        self.repeat_frequency = repeat;
        self
    }

    pub fn start(&self) -> DateTime<Utc> {
        time::instant(self.start_epoch_millis)
    }

    pub fn end(&self) -> DateTime<Utc> {
        time::instant(self.end_epoch_millis)
    }

    /// Local calendar date the event starts on.
    pub fn start_date(&self, zone: Tz) -> NaiveDate {
        time::local_date(self.start_epoch_millis, zone)
    }

    /// Local calendar date the event ends on.
    pub fn end_date(&self, zone: Tz) -> NaiveDate {
        time::local_date(self.end_epoch_millis, zone)
    }

    /// Whether the store has assigned an id yet.
    pub fn is_persisted(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn color_or(&self, default: EventColor) -> EventColor {
        EventColor::resolve(self.color_argb, default)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.trim().is_empty() {
            f.write_str("(Untitled event)")
        } else {
            f.write_str(&self.title)
        }
    }
}
