//! Month grid construction.
//!
//! A month is laid out in seven columns starting at a caller-chosen weekday.
//! Days before the 1st and after the last day are padded with empty cells
//! only as far as needed to complete the final row, so a month spans four,
//! five or six rows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::constants::DAYS_PER_WEEK;
use crate::error::CoreError;

/// A calendar month. Always holds the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `None` when `month` is outside 1..=12 or the year is out of chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn days_in_month(self) -> usize {
        self.dates_unbounded()
            .take_while(|d| d.month() == self.0.month())
            .count()
    }

    pub fn last_day(self) -> NaiveDate {
        self.dates().last().unwrap_or(self.0)
    }

    /// Every date of the month, ascending.
    pub fn dates(self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.dates_unbounded().take_while(move |d| d.month() == month)
    }

    fn dates_unbounded(self) -> impl Iterator<Item = NaiveDate> {
        self.0.iter_days()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month; stays put at the end of chrono's range.
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(YearMonth)
            .unwrap_or(self)
    }

    /// The preceding month; stays put at the start of chrono's range.
    pub fn prev(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(YearMonth)
            .unwrap_or(self)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%B %Y"))
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

/// One slot of the seven-column month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    Date(NaiveDate),
    /// Padding before the 1st or after the last day.
    Empty,
}

impl GridCell {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            GridCell::Date(d) => Some(d),
            GridCell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, GridCell::Empty)
    }
}

/// Build the cells for `year_month` with rows starting on `first_day_of_week`.
///
/// The result always has a multiple of seven cells, and every date of the
/// month appears exactly once, in order.
pub fn build_month_cells(year_month: YearMonth, first_day_of_week: Weekday) -> Vec<GridCell> {
    let first = year_month.first_day();
    let days = year_month.days_in_month();

    let leading = (first.weekday().num_days_from_monday() + DAYS_PER_WEEK as u32
        - first_day_of_week.num_days_from_monday()) as usize
        % DAYS_PER_WEEK;
    let trailing = (DAYS_PER_WEEK - (leading + days) % DAYS_PER_WEEK) % DAYS_PER_WEEK;

    let mut cells = Vec::with_capacity(leading + days + trailing);
    cells.extend(std::iter::repeat_n(GridCell::Empty, leading));
    cells.extend(year_month.dates().map(GridCell::Date));
    cells.extend(std::iter::repeat_n(GridCell::Empty, trailing));
    cells
}

/// The seven weekdays in column order, starting at `first_day_of_week`.
pub fn weekday_header(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut day = first_day_of_week;
    std::array::from_fn(|_| {
        let current = day;
        day = day.succ();
        current
    })
}

/// A built month grid with row access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year_month: YearMonth,
    pub first_day_of_week: Weekday,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn new(year_month: YearMonth, first_day_of_week: Weekday) -> Self {
        MonthGrid {
            year_month,
            first_day_of_week,
            cells: build_month_cells(year_month, first_day_of_week),
        }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn week_count(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    pub fn header(&self) -> [Weekday; 7] {
        weekday_header(self.first_day_of_week)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(|cell| cell.date())
    }

    /// `(row, column)` of `date`, if it belongs to this month.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|cell| *cell == GridCell::Date(date))
            .map(|index| (index / DAYS_PER_WEEK, index % DAYS_PER_WEEK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_2024() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn march_2024_monday_first() {
        let cells = build_month_cells(march_2024(), Weekday::Mon);

        // March 1st 2024 is a Friday.
        assert!(cells[..4].iter().all(|c| c.is_empty()));
        assert_eq!(cells[4], GridCell::Date(date(2024, 3, 1)));
        assert_eq!(cells[34], GridCell::Date(date(2024, 3, 31)));
        assert_eq!(cells.len(), 35);
    }

    #[test]
    fn march_2024_sunday_first_needs_six_rows() {
        let grid = MonthGrid::new(march_2024(), Weekday::Sun);
        assert_eq!(grid.week_count(), 6);
        assert_eq!(grid.cells().iter().take_while(|c| c.is_empty()).count(), 5);
        assert_eq!(grid.cells().iter().rev().take_while(|c| c.is_empty()).count(), 6);
    }

    #[test]
    fn february_starting_on_first_weekday_fills_four_rows() {
        let grid = MonthGrid::new(YearMonth::new(2021, 2).unwrap(), Weekday::Mon);
        assert_eq!(grid.cells().len(), 28);
        assert!(grid.cells().iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn every_weekday_puts_dates_in_their_column() {
        let ym = YearMonth::new(2025, 7).unwrap();
        let mut day = Weekday::Mon;
        for _ in 0..7 {
            let grid = MonthGrid::new(ym, day);
            assert_eq!(grid.cells().len() % 7, 0);
            for d in ym.dates() {
                let (_, col) = grid.position_of(d).unwrap();
                let expected = (d.weekday().num_days_from_monday() + 7
                    - day.num_days_from_monday())
                    % 7;
                assert_eq!(col as u32, expected, "{d} with rows starting {day:?}");
            }
            day = day.succ();
        }
    }

    #[test]
    fn leap_february() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2000, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn rows_are_seven_wide() {
        let grid = MonthGrid::new(march_2024(), Weekday::Wed);
        assert!(grid.rows().all(|row| row.len() == 7));
        assert_eq!(grid.dates().count(), 31);
    }

    #[test]
    fn header_rotates() {
        assert_eq!(
            weekday_header(Weekday::Sat),
            [
                Weekday::Sat,
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
    }

    #[test]
    fn year_month_navigation() {
        let dec = YearMonth::new(2023, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2024, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(dec.last_day(), date(2023, 12, 31));
        assert!(dec.contains(date(2023, 12, 5)));
        assert!(!dec.contains(date(2024, 12, 5)));
        assert_eq!(YearMonth::from_date(date(2024, 3, 17)), march_2024());
    }

    #[test]
    fn year_month_parse_and_display() {
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), march_2024());
        assert_eq!(march_2024().to_string(), "March 2024");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(2024, 0).is_none());
    }

    #[test]
    fn outside_dates_have_no_position() {
        let grid = MonthGrid::new(march_2024(), Weekday::Mon);
        assert_eq!(grid.position_of(date(2024, 4, 1)), None);
        assert_eq!(grid.position_of(date(2024, 3, 1)), Some((0, 4)));
    }
}
