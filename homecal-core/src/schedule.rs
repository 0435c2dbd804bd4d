//! Hour-by-hour layout of a single day.
//!
//! Builds on [`project_onto_day`]: each of the 24 rows shows one primary
//! event (the covering event that starts earliest) and counts the rest.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::constants::{HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::event::Event;
use crate::span::{DaySpan, project_onto_day};

/// An event together with its span on the scheduled day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent<'a> {
    pub event: &'a Event,
    pub span: DaySpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourRow<'a> {
    pub hour: u16,
    pub primary: Option<ScheduledEvent<'a>>,
    /// Whether the primary event begins within this hour (rows below it
    /// only continue the block).
    pub is_start_hour: bool,
    pub covering: Vec<ScheduledEvent<'a>>,
}

impl HourRow<'_> {
    /// How many covering events are hidden behind the primary one.
    pub fn additional(&self) -> usize {
        self.covering.len().saturating_sub(1)
    }

    pub fn first_minute(&self) -> u16 {
        self.hour * MINUTES_PER_HOUR
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    scheduled: Vec<ScheduledEvent<'a>>,
    rows: Vec<HourRow<'a>>,
}

impl<'a> DaySchedule<'a> {
    /// Lay out `events` on `date`. Events that do not touch the day are
    /// skipped, so callers may pass a whole snapshot.
    pub fn build(events: &'a [Event], date: NaiveDate, zone: Tz) -> Self {
        let scheduled: Vec<ScheduledEvent<'a>> = events
            .iter()
            .filter_map(|event| {
                project_onto_day(event, date, zone).map(|span| ScheduledEvent { event, span })
            })
            .collect();

        let rows = (0..HOURS_PER_DAY)
            .map(|hour| Self::row(&scheduled, hour))
            .collect();

        DaySchedule {
            date,
            scheduled,
            rows,
        }
    }

    fn row(scheduled: &[ScheduledEvent<'a>], hour: u16) -> HourRow<'a> {
        let row_start = hour * MINUTES_PER_HOUR;
        let row_end = row_start + MINUTES_PER_HOUR;

        let covering: Vec<ScheduledEvent<'a>> = scheduled
            .iter()
            .filter(|s| s.span.overlaps(row_start, row_end))
            .copied()
            .collect();

        let primary = covering.iter().min_by_key(|s| s.span.start_minute).copied();
        let is_start_hour = primary
            .map(|p| (row_start..row_end).contains(&p.span.start_minute))
            .unwrap_or(false);

        HourRow {
            hour,
            primary,
            is_start_hour,
            covering,
        }
    }

    /// The 24 rows, midnight first.
    pub fn rows(&self) -> &[HourRow<'a>] {
        &self.rows
    }

    /// Every event that touches the day, in input order.
    pub fn scheduled(&self) -> &[ScheduledEvent<'a>] {
        &self.scheduled
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use chrono_tz::Europe::Berlin;

    use crate::time::at_time;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timed(title: &str, day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Event {
        let t = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        Event::timed(title, at_time(day, t(start), Berlin), at_time(day, t(end), Berlin))
    }

    #[test]
    fn always_24_rows() {
        let schedule = DaySchedule::build(&[], date(2024, 3, 10), Berlin);
        assert_eq!(schedule.rows().len(), 24);
        assert!(schedule.is_empty());
        assert!(schedule.rows().iter().all(|r| r.primary.is_none()));
    }

    #[test]
    fn overlapping_events_share_rows() {
        let d = date(2024, 3, 10);
        let events = vec![
            timed("Standup", d, (9, 30), (11, 0)),
            timed("Breakfast", d, (9, 0), (10, 0)),
        ];
        let schedule = DaySchedule::build(&events, d, Berlin);

        let nine = &schedule.rows()[9];
        assert_eq!(nine.primary.unwrap().event.title, "Breakfast");
        assert!(nine.is_start_hour);
        assert_eq!(nine.additional(), 1);

        let ten = &schedule.rows()[10];
        assert_eq!(ten.primary.unwrap().event.title, "Standup");
        assert!(!ten.is_start_hour);
        assert_eq!(ten.additional(), 0);

        assert!(schedule.rows()[11].primary.is_none());
    }

    #[test]
    fn equal_starts_pick_first_in_input() {
        let d = date(2024, 3, 10);
        let events = vec![
            timed("First", d, (14, 0), (15, 0)),
            timed("Second", d, (14, 0), (14, 30)),
        ];
        let schedule = DaySchedule::build(&events, d, Berlin);

        assert_eq!(schedule.rows()[14].primary.unwrap().event.title, "First");
    }

    #[test]
    fn all_day_event_covers_every_row() {
        let d = date(2024, 3, 10);
        let events = vec![
            Event::all_day("Holiday", d, Berlin),
            timed("Lunch", d, (12, 0), (13, 0)),
        ];
        let schedule = DaySchedule::build(&events, d, Berlin);

        assert!(schedule.rows().iter().all(|r| r.primary.is_some()));
        assert!(schedule.rows()[0].is_start_hour);
        assert!(!schedule.rows()[12].is_start_hour);
        assert_eq!(schedule.rows()[12].additional(), 1);
    }

    #[test]
    fn events_on_other_days_are_skipped() {
        let d = date(2024, 3, 10);
        let events = vec![timed("Elsewhere", date(2024, 3, 11), (9, 0), (10, 0))];
        let schedule = DaySchedule::build(&events, d, Berlin);

        assert!(schedule.is_empty());
    }

    #[test]
    fn row_boundaries() {
        let d = date(2024, 3, 10);
        let events = vec![timed("Call", d, (8, 0), (9, 0))];
        let schedule = DaySchedule::build(&events, d, Berlin);

        assert!(schedule.rows()[8].primary.is_some());
        assert!(schedule.rows()[9].primary.is_none());
        assert_eq!(schedule.rows()[8].first_minute(), 480);
    }
}
