//! Grouping events by local calendar date.
//!
//! The index is rebuilt from scratch for every snapshot the store delivers;
//! it holds no state beyond the snapshot it was built from.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::event::Event;
use crate::grid::YearMonth;

/// Events bucketed by the local date of their start instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventIndex {
    by_date: BTreeMap<NaiveDate, Vec<Event>>,
}

/// The first few events of a day plus how many were left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPreview<'a> {
    pub shown: &'a [Event],
    pub more: usize,
}

impl EventIndex {
    /// Group `events` by their local start date in `zone`.
    ///
    /// Each bucket is ordered by start instant; events starting at the same
    /// instant keep their input order.
    pub fn build(events: &[Event], zone: Tz) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

        for event in events {
            by_date
                .entry(event.start_date(zone))
                .or_default()
                .push(event.clone());
        }

        for bucket in by_date.values_mut() {
            bucket.sort_by_key(|e| e.start_epoch_millis);
        }

        EventIndex { by_date }
    }

    /// Events starting on `date`; empty when there are none.
    pub fn day(&self, date: NaiveDate) -> &[Event] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every date in `year_month` that has events, ascending.
    pub fn month(&self, year_month: YearMonth) -> Vec<(NaiveDate, &[Event])> {
        self.by_date
            .range(year_month.first_day()..=year_month.last_day())
            .map(|(date, events)| (*date, events.as_slice()))
            .collect()
    }

    pub fn day_preview(&self, date: NaiveDate, limit: usize) -> DayPreview<'_> {
        let events = self.day(date);
        let shown = &events[..events.len().min(limit)];
        DayPreview {
            shown,
            more: events.len() - shown.len(),
        }
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Dates that have at least one event, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Total number of indexed events.
    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Events that have not ended by `now`, soonest first.
///
/// Repeated deliveries of the same persisted id collapse to the first one
/// seen. Events without an id are all kept.
pub fn upcoming(events: &[Event], now: DateTime<Utc>) -> Vec<Event> {
    let now_millis = now.timestamp_millis();
    let mut seen: HashSet<&str> = HashSet::new();

    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| !e.is_persisted() || seen.insert(e.id.as_str()))
        .filter(|e| e.end_epoch_millis >= now_millis)
        .cloned()
        .collect();

    upcoming.sort_by_key(|e| e.start_epoch_millis);
    upcoming
}
