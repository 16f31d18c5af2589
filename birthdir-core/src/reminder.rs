//! Birthday reminder records.
//!
//! `Reminder` is what the store owns. `ReminderFields` is the unvalidated
//! input to `create`, `ReminderPatch` the partial input to `update`.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::BirthDate;
use crate::error::{BirthdirError, BirthdirResult};

/// Store-assigned identity of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(Uuid);

impl ReminderId {
    pub fn new() -> Self {
        ReminderId(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> BirthdirResult<Self> {
        Uuid::parse_str(s.trim())
            .map(ReminderId)
            .map_err(|_| BirthdirError::Validation(format!("'{s}' is not a reminder id")))
    }

    /// First block of the UUID, enough to tell reminders apart on screen.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored birthday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub name: String,
    pub date: BirthDate,
    /// Informational only; recurrence never looks at it.
    #[serde(default)]
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Opaque avatar reference (usually a URL). Never fetched or checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

impl Reminder {
    /// Age reached on `occurrence`, when the birth year is known.
    pub fn turning_age(&self, occurrence: NaiveDate) -> Option<u32> {
        let birth_year = self.date.year()?;
        u32::try_from(occurrence.year() - birth_year).ok()
    }

    /// Re-check the record invariants.
    pub fn validate(&self) -> BirthdirResult<()> {
        if self.name.trim().is_empty() {
            return Err(BirthdirError::Validation("name is required".into()));
        }
        Ok(())
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date)
    }
}

/// Input for creating a reminder. `name` and `date` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderFields {
    pub name: Option<String>,
    /// `YYYY-MM-DD`, `*-MM-DD` or `--MM-DD`.
    pub date: Option<String>,
    pub age: Option<u32>,
    pub note: Option<String>,
    pub contact: Option<String>,
    pub avatar_ref: Option<String>,
}

impl ReminderFields {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        ReminderFields {
            name: Some(name.into()),
            date: Some(date.into()),
            ..Default::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_avatar_ref(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }

    /// Validate the fields and build a reminder carrying `id`.
    pub fn into_reminder(self, id: ReminderId) -> BirthdirResult<Reminder> {
        let name = required_text(self.name, "name")?;
        let date = parse_date(&required_text(self.date, "date")?)?;

        Ok(Reminder {
            id,
            name,
            date,
            age: self.age.unwrap_or(0),
            note: optional_text(self.note),
            contact: optional_text(self.contact),
            avatar_ref: optional_text(self.avatar_ref),
        })
    }
}

/// Partial update. `None` leaves a field alone; for the optional text
/// fields `Some(None)` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderPatch {
    pub name: Option<String>,
    pub date: Option<String>,
    pub age: Option<u32>,
    pub note: Option<Option<String>>,
    pub contact: Option<Option<String>>,
    pub avatar_ref: Option<Option<String>>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.age.is_none()
            && self.note.is_none()
            && self.contact.is_none()
            && self.avatar_ref.is_none()
    }

    /// Return `reminder` with this patch merged in. The id is never touched.
    pub fn apply(self, reminder: &Reminder) -> BirthdirResult<Reminder> {
        let mut updated = reminder.clone();

        if let Some(name) = self.name {
            updated.name = required_text(Some(name), "name")?;
        }
        if let Some(date) = self.date {
            updated.date = parse_date(&required_text(Some(date), "date")?)?;
        }
        if let Some(age) = self.age {
            updated.age = age;
        }
        if let Some(note) = self.note {
            updated.note = optional_text(note);
        }
        if let Some(contact) = self.contact {
            updated.contact = optional_text(contact);
        }
        if let Some(avatar_ref) = self.avatar_ref {
            updated.avatar_ref = optional_text(avatar_ref);
        }

        Ok(updated)
    }
}

fn required_text(value: Option<String>, field: &str) -> BirthdirResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BirthdirError::Validation(format!("{field} is required"))),
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> BirthdirResult<BirthDate> {
    value.parse()
}
