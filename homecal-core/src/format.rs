//! Human-readable event times.

use chrono_tz::Tz;

use crate::event::Event;
use crate::time;

const TIME: &str = "%H:%M";

/// "Mar 10, 2024  09:00 – 10:00", "Mar 10, 2024  All day", or
/// "Mar 10, 2024 22:00 → Mar 11, 2024 06:00" for events crossing midnight.
pub fn time_range(event: &Event, zone: Tz) -> String {
    const DATE: &str = "%b %-d, %Y";
    let start = time::zoned(event.start_epoch_millis, zone);
    let end = time::zoned(event.end_epoch_millis, zone);

    if event.all_day {
        return format!("{}  All day", start.format(DATE));
    }

    if start.date_naive() == end.date_naive() {
        format!(
            "{}  {} – {}",
            start.format(DATE),
            start.format(TIME),
            end.format(TIME)
        )
    } else {
        format!(
            "{} {} → {} {}",
            start.format(DATE),
            start.format(TIME),
            end.format(DATE),
            end.format(TIME)
        )
    }
}

/// "09:00 – 10:00" or "All day".
pub fn time_range_short(event: &Event, zone: Tz) -> String {
    if event.all_day {
        return "All day".to_string();
    }
    let start = time::zoned(event.start_epoch_millis, zone);
    let end = time::zoned(event.end_epoch_millis, zone);
    format!("{} – {}", start.format(TIME), end.format(TIME))
}

/// Compact line for lists: "Mar 10 · 09:00 – 10:00", "Mar 10 · All day",
/// or "Mar 10 22:00 → Mar 11 06:00".
pub fn detail_line(event: &Event, zone: Tz) -> String {
    const DATE: &str = "%b %-d";
    let start = time::zoned(event.start_epoch_millis, zone);
    let end = time::zoned(event.end_epoch_millis, zone);

    if event.all_day {
        format!("{} · All day", start.format(DATE))
    } else if start.date_naive() == end.date_naive() {
        format!(
            "{} · {} – {}",
            start.format(DATE),
            start.format(TIME),
            end.format(TIME)
        )
    } else {
        format!(
            "{} {} → {} {}",
            start.format(DATE),
            start.format(TIME),
            end.format(DATE),
            end.format(TIME)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use chrono_tz::Europe::Berlin;

    use crate::time::at_time;

    fn at(d: u32, h: u32, m: u32) -> chrono::DateTime<chrono::Utc> {
        at_time(
            NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
            Berlin,
        )
    }

    #[test]
    fn same_day_range() {
        let event = Event::timed("Dentist", at(10, 9, 0), at(10, 10, 0));
        assert_eq!(time_range(&event, Berlin), "Mar 10, 2024  09:00 – 10:00");
        assert_eq!(time_range_short(&event, Berlin), "09:00 – 10:00");
        assert_eq!(detail_line(&event, Berlin), "Mar 10 · 09:00 – 10:00");
    }

    #[test]
    fn overnight_range() {
        let event = Event::timed("Night shift", at(10, 22, 0), at(11, 6, 0));
        assert_eq!(
            time_range(&event, Berlin),
            "Mar 10, 2024 22:00 → Mar 11, 2024 06:00"
        );
        assert_eq!(detail_line(&event, Berlin), "Mar 10 22:00 → Mar 11 06:00");
    }

    #[test]
    fn all_day_range() {
        let event = Event::all_day("Holiday", NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), Berlin);
        assert_eq!(time_range(&event, Berlin), "Mar 10, 2024  All day");
        assert_eq!(time_range_short(&event, Berlin), "All day");
        assert_eq!(detail_line(&event, Berlin), "Mar 10 · All day");
    }

    #[test]
    fn out_of_range_millis_still_format() {
        let mut event = Event::timed("Forever", at(10, 9, 0), at(10, 10, 0));
        event.start_epoch_millis = i64::MIN;
        event.end_epoch_millis = i64::MAX;

        let zone = chrono_tz::Asia::Kolkata;
        assert!(time_range(&event, zone).contains('→'));
        assert!(detail_line(&event, zone).contains('→'));
        assert!(!time_range_short(&event, zone).is_empty());
    }
}
