pub const MINUTES_PER_DAY: u16 = 24 * 60;

pub const MINUTES_PER_HOUR: u16 = 60;

pub const HOURS_PER_DAY: u16 = 24;

pub const DAYS_PER_WEEK: usize = 7;

/// Household used when a profile has no code yet.
pub const DEFAULT_HOUSEHOLD: &str = "FAMILY";

/// New profiles get the first characters of their uid as household code.
pub const HOUSEHOLD_CODE_LEN: usize = 6;

/// How many events a month cell lists before collapsing the rest.
pub const MONTH_CELL_PREVIEW: usize = 3;

/// Link category selection that shows every link.
pub const ALL_CATEGORIES: &str = "All";
