//! Public holidays shown next to the reminders.
//!
//! Holidays come from a remote [`HolidaySource`] when it answers in time with
//! a well-formed payload, and from a fixed template otherwise. Callers of
//! [`HolidayProvider::get_upcoming`] never see which one it was.

mod provider;
mod source;

pub use provider::HolidayProvider;
pub use source::{CalendarificSource, HolidaySource};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BirthdirError, BirthdirResult};

/// A civic holiday. Read-only: never stored with reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub iso_date: NaiveDate,
}

impl Holiday {
    pub fn iso_date_string(&self) -> String {
        self.iso_date.format("%Y-%m-%d").to_string()
    }
}

struct HolidayTemplate {
    name: &'static str,
    description: &'static str,
    month: u32,
    day: u32,
}

const FALLBACK_TEMPLATE: [HolidayTemplate; 5] = [
    HolidayTemplate {
        name: "New Year's Day",
        description: "Celebrates the beginning of the Gregorian calendar year.",
        month: 1,
        day: 1,
    },
    HolidayTemplate {
        name: "Martin Luther King Jr. Day",
        description: "Honors Martin Luther King Jr., Civil Rights leader.",
        month: 1,
        day: 15,
    },
    HolidayTemplate {
        name: "Valentine's Day",
        description: "Celebrated as a significant cultural, and commercial celebration of romance.",
        month: 2,
        day: 14,
    },
    HolidayTemplate {
        name: "Independence Day",
        description: "Celebrates the adoption of the Declaration of Independence.",
        month: 7,
        day: 4,
    },
    HolidayTemplate {
        name: "Christmas Day",
        description: "Celebrates the birth of Jesus Christ.",
        month: 12,
        day: 25,
    },
];

/// The built-in holiday set with every date moved into `year`.
pub fn fallback_holidays(year: i32) -> Vec<Holiday> {
    FALLBACK_TEMPLATE
        .iter()
        .filter_map(|t| {
            NaiveDate::from_ymd_opt(year, t.month, t.day).map(|iso_date| Holiday {
                name: t.name.to_string(),
                description: Some(t.description.to_string()),
                iso_date,
            })
        })
        .collect()
}

/// Keep holidays on or after `today`, earliest first, at most `limit`.
pub fn select_upcoming(mut holidays: Vec<Holiday>, today: NaiveDate, limit: usize) -> Vec<Holiday> {
    holidays.retain(|h| h.iso_date >= today);
    holidays.sort_by_key(|h| h.iso_date);
    holidays.truncate(limit);
    holidays
}

/// Validate a raw source payload and turn it into holidays.
///
/// Accepts either a bare array of holiday objects or the Calendarific
/// envelope `{"response": {"holidays": [...]}}`. The array must be non-empty
/// and every entry needs a name and a date resolvable to `YYYY-MM-DD`
/// (`date.iso`, a `date` string or `isoDate`). One bad entry rejects the
/// whole payload.
pub fn parse_payload(payload: &Value) -> BirthdirResult<Vec<Holiday>> {
    let entries = payload
        .as_array()
        .or_else(|| payload.pointer("/response/holidays").and_then(Value::as_array))
        .or_else(|| payload.get("holidays").and_then(Value::as_array))
        .ok_or_else(|| malformed("payload has no holiday list"))?;

    if entries.is_empty() {
        return Err(malformed("holiday list is empty"));
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_entry(entry).map_err(|e| malformed(&format!("entry {i}: {e}"))))
        .collect()
}

fn parse_entry(entry: &Value) -> Result<Holiday, String> {
    if !entry.is_object() {
        return Err("not an object".into());
    }

    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or("missing name")?;

    let raw_date = entry
        .pointer("/date/iso")
        .and_then(Value::as_str)
        .or_else(|| entry.get("date").and_then(Value::as_str))
        .or_else(|| entry.get("isoDate").and_then(Value::as_str))
        .ok_or("missing date")?;

    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(Holiday {
        name: name.to_string(),
        description,
        iso_date: parse_iso_date(raw_date).ok_or_else(|| format!("bad date '{raw_date}'"))?,
    })
}

/// `YYYY-MM-DD`, optionally followed by a `T...` time part.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10)?;
    let rest = &raw[10..];
    if !rest.is_empty() && !rest.starts_with('T') {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn malformed(reason: &str) -> BirthdirError {
    BirthdirError::ProviderUnavailable(format!("malformed holiday payload: {reason}"))
}
