//! Local date and instant conversions.
//!
//! Every conversion takes the zone explicitly. `local_zone` is the documented
//! default for callers that have nothing better (the CLI falls back to it when
//! the config names no zone).

use chrono::{
    DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{CoreError, CoreResult};

const DAY_MILLIS: i64 = 86_400_000;

/// The system's IANA zone, or UTC when it cannot be determined.
pub fn local_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}

/// Parse an IANA zone name such as `Europe/Berlin`.
pub fn parse_zone(name: &str) -> CoreResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CoreError::InvalidZone(name.to_string()))
}

/// Epoch milliseconds as an instant, saturating at chrono's representable range.
pub fn instant(millis: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Resolve a local wall-clock time to an instant.
///
/// Ambiguous times (the repeated hour when clocks go back) take the earlier
/// instant. Times inside a gap are read with the offset in force before the
/// gap, which moves them forward by the gap's length.
fn resolve_local(zone: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(dt) = zone.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }

    let before = naive.checked_sub_signed(Duration::days(1)).unwrap_or(naive);
    let offset_secs = zone
        .from_local_datetime(&before)
        .earliest()
        .map(|dt| dt.offset().fix().local_minus_utc())
        .unwrap_or(0);

    naive
        .checked_sub_signed(Duration::seconds(i64::from(offset_secs)))
        .unwrap_or(naive)
        .and_utc()
}

/// First instant of `date` in `zone`.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    resolve_local(zone, date.and_time(NaiveTime::MIN))
}

/// First instant of the day after `date`, i.e. the exclusive end of `date`.
pub fn start_of_next_day(date: NaiveDate, zone: Tz) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => start_of_day(next, zone),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

pub fn start_of_day_millis(date: NaiveDate, zone: Tz) -> i64 {
    start_of_day(date, zone).timestamp_millis()
}

/// Last millisecond of `date` in `zone`; all-day events end here.
pub fn end_of_day_millis(date: NaiveDate, zone: Tz) -> i64 {
    start_of_next_day(date, zone).timestamp_millis() - 1
}

/// `time` on `date` in `zone`.
pub fn at_time(date: NaiveDate, time: NaiveTime, zone: Tz) -> DateTime<Utc> {
    resolve_local(zone, date.and_time(time))
}

pub fn at_time_millis(date: NaiveDate, time: NaiveTime, zone: Tz) -> i64 {
    at_time(date, time, zone).timestamp_millis()
}

/// An instant as seen in `zone`.
///
/// Millis are held a day inside chrono's range first, so the local reading
/// exists in every zone.
pub fn zoned(millis: i64, zone: Tz) -> DateTime<Tz> {
    let min = DateTime::<Utc>::MIN_UTC.timestamp_millis() + DAY_MILLIS;
    let max = DateTime::<Utc>::MAX_UTC.timestamp_millis() - DAY_MILLIS;
    instant(millis.clamp(min, max)).with_timezone(&zone)
}

/// Calendar date of an instant as seen in `zone`.
pub fn local_date(millis: i64, zone: Tz) -> NaiveDate {
    zoned(millis, zone).date_naive()
}

/// Wall-clock time of an instant as seen in `zone`.
pub fn local_time(millis: i64, zone: Tz) -> NaiveTime {
    zoned(millis, zone).time()
}
