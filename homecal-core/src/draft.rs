//! The event editor's working copy.
//!
//! A draft holds what the editor form collects for one date. Building it
//! checks the form and produces the [`Event`] handed to the store.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::color::EventColor;
use crate::error::{CoreError, CoreResult};
use crate::event::{Event, RepeatFrequency};
use crate::time;

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Id of the event being edited; empty for a new one.
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub all_day: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub repeat_frequency: RepeatFrequency,
    /// Zero picks the default color on build.
    pub color_argb: u32,
    pub notes: Option<String>,
    pub person_tag: Option<String>,
}

impl EventDraft {
    /// A blank draft for `date`, 09:00 to 10:00.
    pub fn new(date: NaiveDate) -> Self {
        EventDraft {
            id: String::new(),
            date,
            title: String::new(),
            all_day: false,
            start_time: default_start_time(),
            end_time: default_end_time(),
            repeat_frequency: RepeatFrequency::None,
            color_argb: 0,
            notes: None,
            person_tag: None,
        }
    }

    /// A draft seeded from an existing event, read in `zone`.
    ///
    /// All-day events reset the time pickers to 09:00 to 10:00.
    pub fn edit(event: &Event, zone: Tz) -> Self {
        let (start_time, end_time) = if event.all_day {
            (default_start_time(), default_end_time())
        } else {
            (
                time::local_time(event.start_epoch_millis, zone),
                time::local_time(event.end_epoch_millis, zone),
            )
        };

        EventDraft {
            id: event.id.clone(),
            date: event.start_date(zone),
            title: event.title.clone(),
            all_day: event.all_day,
            start_time,
            end_time,
            repeat_frequency: event.repeat_frequency,
            color_argb: event.color_argb,
            notes: event.notes.clone(),
            person_tag: event.person_tag.clone(),
        }
    }

    /// Check the draft and turn it into an event in `zone`.
    pub fn build(&self, zone: Tz, default_color: EventColor) -> CoreResult<Event> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::EmptyTitle);
        }

        let (start, end) = if self.all_day {
            (
                time::start_of_day_millis(self.date, zone),
                time::end_of_day_millis(self.date, zone),
            )
        } else {
            if self.end_time <= self.start_time {
                return Err(CoreError::EndNotAfterStart);
            }
            (
                time::at_time_millis(self.date, self.start_time, zone),
                time::at_time_millis(self.date, self.end_time, zone),
            )
        };

        Ok(Event {
            id: self.id.clone(),
            title: title.to_string(),
            start_epoch_millis: start,
            end_epoch_millis: end,
            all_day: self.all_day,
            repeat_frequency: self.repeat_frequency,
            notes: non_blank(self.notes.as_deref()),
            color_argb: EventColor::resolve(self.color_argb, default_color).argb(),
            person_tag: non_blank(self.person_tag.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
