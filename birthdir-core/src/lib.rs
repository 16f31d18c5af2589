//! Reminder engine for birthdir.
//!
//! This crate holds everything that makes decisions about birthdays:
//! - `date` for next-occurrence and day-count math
//! - `store` for the reminder collection and its persistence boundary
//! - `rank` for ordering and urgency tiers
//! - `holiday` for the remote holiday feed and its offline fallback
//! - `view` for the combined read model handed to presentation

pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod holiday;
pub mod rank;
pub mod reminder;
pub mod store;
pub mod view;

pub use error::{BirthdirError, BirthdirResult};
pub use reminder::{Reminder, ReminderFields, ReminderId, ReminderPatch};
