//! The read model handed to presentation.
//!
//! Reminders and holidays stay in two separately ordered lists; they are
//! never merged into one timeline.

use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::config::Settings;
use crate::holiday::{Holiday, HolidayProvider};
use crate::rank::{RankedReminder, Summary, rank};
use crate::reminder::Reminder;
use crate::store::ReminderStore;

/// Snapshot of everything a screen renders, computed for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub today: NaiveDate,
    pub ranked_reminders: Vec<RankedReminder>,
    pub upcoming_holidays: Vec<Holiday>,
    pub summary: Summary,
}

impl DashboardView {
    pub fn new(
        reminders: Vec<Reminder>,
        upcoming_holidays: Vec<Holiday>,
        today: NaiveDate,
    ) -> Self {
        let ranked_reminders = rank(reminders, today);
        let summary = Summary::from_ranked(&ranked_reminders);

        DashboardView {
            today,
            ranked_reminders,
            upcoming_holidays,
            summary,
        }
    }
}

/// Rank the store's reminders and fetch upcoming holidays for `today`.
pub async fn build_view<S: ReminderStore + ?Sized>(
    store: &S,
    provider: &HolidayProvider,
    settings: &Settings,
    today: NaiveDate,
) -> DashboardView {
    let holidays = provider
        .get_upcoming(&settings.country, today.year(), today, settings.holiday_limit)
        .await;

    DashboardView::new(store.list(), holidays, today)
}

/// Token for one activation of a dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    generation: u64,
}

#[derive(Debug, Default)]
struct DashboardState {
    generation: u64,
    holidays: Option<Vec<Holiday>>,
}

/// A long-lived screen that fetches holidays once per activation.
///
/// A fetch that completes after its activation ended (the screen was left or
/// re-activated) is dropped without touching the held holidays.
pub struct Dashboard {
    provider: HolidayProvider,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(provider: HolidayProvider) -> Self {
        Dashboard {
            provider,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// Start a new activation, invalidating any earlier one.
    pub fn activate(&self) -> Activation {
        let mut state = self.lock();
        state.generation += 1;
        state.holidays = None;
        Activation {
            generation: state.generation,
        }
    }

    pub fn deactivate(&self) {
        self.lock().generation += 1;
    }

    pub fn is_active(&self, activation: &Activation) -> bool {
        self.lock().generation == activation.generation
    }

    /// Fetch holidays for `activation`. Returns `None` and keeps nothing if
    /// the activation ended while the fetch was in flight.
    pub async fn refresh_holidays(
        &self,
        activation: &Activation,
        settings: &Settings,
        today: NaiveDate,
    ) -> Option<Vec<Holiday>> {
        let holidays = self
            .provider
            .get_upcoming(&settings.country, today.year(), today, settings.holiday_limit)
            .await;

        let mut state = self.lock();
        if state.generation != activation.generation {
            debug!("Discarding holidays fetched for an inactive view");
            return None;
        }

        state.holidays = Some(holidays.clone());
        Some(holidays)
    }

    /// Holidays held for the current activation, if fetched.
    pub fn holidays(&self) -> Option<Vec<Holiday>> {
        self.lock().holidays.clone()
    }

    /// Build a view from the store and the holidays held so far.
    pub fn view<S: ReminderStore + ?Sized>(&self, store: &S, today: NaiveDate) -> DashboardView {
        DashboardView::new(store.list(), self.holidays().unwrap_or_default(), today)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
