use std::time::Duration;

/// Budget for a single remote holiday fetch before falling back.
pub const HOLIDAY_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_COUNTRY: &str = "US";

/// How many upcoming holidays the dashboard shows.
pub const DEFAULT_HOLIDAY_LIMIT: usize = 3;

/// Advance notice window for alerts, in days.
pub const DEFAULT_ADVANCE_NOTICE_DAYS: u32 = 7;

pub const CALENDARIFIC_BASE_URL: &str = "https://calendarific.p.rapidapi.com";
pub const CALENDARIFIC_HOST: &str = "calendarific.p.rapidapi.com";
