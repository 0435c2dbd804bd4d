//! Projecting events onto a single local day.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::constants::MINUTES_PER_DAY;
use crate::event::Event;
use crate::time;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// The minutes of a day an event occupies, `start_minute..end_minute`,
/// both within `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaySpan {
    pub start_minute: u16,
    pub end_minute: u16,
}

impl DaySpan {
    pub const FULL_DAY: DaySpan = DaySpan {
        start_minute: 0,
        end_minute: MINUTES_PER_DAY,
    };

    pub fn duration_minutes(self) -> u16 {
        self.end_minute - self.start_minute
    }

    pub fn is_full_day(self) -> bool {
        self == DaySpan::FULL_DAY
    }

    /// Whether this span shares at least one minute with `start..end`.
    pub fn overlaps(self, start: u16, end: u16) -> bool {
        self.start_minute < end && self.end_minute > start
    }
}

/// The part of `event` that falls on `date` in `zone`, or `None` when the
/// event does not touch that day.
///
/// All-day events cover every local date from their start date through the
/// date of their last millisecond. Timed events are clipped to the day and
/// measured in whole minutes from local midnight; a span that clips to zero
/// minutes, or an event whose end precedes its start, yields `None`.
pub fn project_onto_day(event: &Event, date: NaiveDate, zone: Tz) -> Option<DaySpan> {
    if event.all_day {
        if event.end_epoch_millis < event.start_epoch_millis {
            return None;
        }
        let first = event.start_date(zone);
        let last = time::local_date(event.end_epoch_millis.saturating_sub(1), zone);
        return (first <= date && date <= last).then_some(DaySpan::FULL_DAY);
    }

    let day_start = time::start_of_day(date, zone).timestamp_millis();
    let day_end = time::start_of_next_day(date, zone).timestamp_millis();

    if event.end_epoch_millis <= day_start || event.start_epoch_millis >= day_end {
        return None;
    }

    let start_minute = minutes_into_day(day_start, event.start_epoch_millis.max(day_start));
    let end_minute = minutes_into_day(day_start, event.end_epoch_millis.min(day_end));

    (end_minute > start_minute).then_some(DaySpan {
        start_minute,
        end_minute,
    })
}

fn minutes_into_day(day_start: i64, instant: i64) -> u16 {
    ((instant - day_start) / MILLIS_PER_MINUTE).clamp(0, i64::from(MINUTES_PER_DAY)) as u16
}
