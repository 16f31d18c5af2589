//! Ranking and urgency classification of reminders.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::{days_until, next_occurrence};
use crate::reminder::Reminder;

/// Display bucket derived from the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTier {
    Today,
    ThisWeek,
    ThisMonth,
    Later,
}

impl UrgencyTier {
    pub fn from_days(days_until: u32) -> Self {
        match days_until {
            0 => UrgencyTier::Today,
            1..=7 => UrgencyTier::ThisWeek,
            8..=30 => UrgencyTier::ThisMonth,
            _ => UrgencyTier::Later,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Today => "Today",
            UrgencyTier::ThisWeek => "This week",
            UrgencyTier::ThisMonth => "This month",
            UrgencyTier::Later => "Later",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reminder with its countdown, computed for one specific day.
///
/// Only valid for the `today` it was ranked with; re-rank after midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReminder {
    pub reminder: Reminder,
    pub next_occurrence: NaiveDate,
    pub days_until: u32,
    pub urgency: UrgencyTier,
}

impl RankedReminder {
    pub fn new(reminder: Reminder, today: NaiveDate) -> Self {
        let month_day = reminder.date.month_day();
        let days_until = days_until(month_day, today);

        RankedReminder {
            next_occurrence: next_occurrence(month_day, today),
            urgency: UrgencyTier::from_days(days_until),
            days_until,
            reminder,
        }
    }

    /// Short countdown text: "Today!", "Tomorrow", "12 days", "3 months".
    pub fn countdown(&self) -> String {
        match self.days_until {
            0 => "Today!".to_string(),
            1 => "Tomorrow".to_string(),
            d if d <= 30 => format!("{d} days"),
            d => {
                let months = d / 30;
                format!("{} {}", months, if months == 1 { "month" } else { "months" })
            }
        }
    }

    /// Age reached on the next occurrence, when the birth year is known.
    pub fn turning_age(&self) -> Option<u32> {
        self.reminder.turning_age(self.next_occurrence)
    }
}

/// Order reminders by how soon they occur.
///
/// The sort is stable: reminders on the same day keep their insertion order.
pub fn rank(reminders: Vec<Reminder>, today: NaiveDate) -> Vec<RankedReminder> {
    let mut ranked: Vec<RankedReminder> = reminders
        .into_iter()
        .map(|r| RankedReminder::new(r, today))
        .collect();

    ranked.sort_by_key(|r| r.days_until);
    log::debug!("Ranked {} reminders for {}", ranked.len(), today);
    ranked
}

/// Counts shown above the reminder list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub today: usize,
    /// Tomorrow through seven days out.
    pub this_week: usize,
    /// Everything within 30 days, today included.
    pub this_month: usize,
    pub later: usize,
}

impl Summary {
    pub fn from_ranked(ranked: &[RankedReminder]) -> Self {
        let count = |tier: UrgencyTier| ranked.iter().filter(|r| r.urgency == tier).count();

        Summary {
            total: ranked.len(),
            today: count(UrgencyTier::Today),
            this_week: count(UrgencyTier::ThisWeek),
            this_month: ranked.iter().filter(|r| r.days_until <= 30).count(),
            later: count(UrgencyTier::Later),
        }
    }
}

/// Ranked reminders falling inside the advance notice window, in rank order.
pub fn due_alerts(ranked: &[RankedReminder], advance_notice_days: u32) -> Vec<RankedReminder> {
    ranked
        .iter()
        .filter(|r| r.days_until <= advance_notice_days)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::{ReminderFields, ReminderId};

    fn reminder(name: &str, date: &str) -> Reminder {
        ReminderFields::new(name, date)
            .into_reminder(ReminderId::new())
            .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 10).unwrap()
    }

    fn names(ranked: &[RankedReminder]) -> Vec<&str> {
        ranked.iter().map(|r| r.reminder.name.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_days_until() {
        let ranked = rank(
            vec![reminder("A", "*-10-15"), reminder("B", "*-10-12")],
            today(),
        );

        assert_eq!(names(&ranked), vec!["B", "A"]);
        assert_eq!(ranked[0].days_until, 2);
        assert_eq!(ranked[0].urgency, UrgencyTier::ThisWeek);
        assert_eq!(ranked[1].days_until, 5);
        assert_eq!(ranked[1].urgency, UrgencyTier::ThisWeek);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let ranked = rank(
            vec![
                reminder("Zed", "1980-11-01"),
                reminder("Amy", "*-10-12"),
                reminder("Bob", "1995-11-01"),
                reminder("Al", "*-10-12"),
            ],
            today(),
        );

        assert_eq!(names(&ranked), vec!["Amy", "Al", "Zed", "Bob"]);
    }

    #[test]
    fn test_rank_rolls_past_dates_to_next_year() {
        let ranked = rank(
            vec![reminder("Past", "*-10-09"), reminder("Today", "*-10-10")],
            today(),
        );

        assert_eq!(names(&ranked), vec!["Today", "Past"]);
        assert_eq!(ranked[0].urgency, UrgencyTier::Today);
        assert_eq!(ranked[1].next_occurrence, NaiveDate::from_ymd_opt(2025, 10, 9).unwrap());
        assert_eq!(ranked[1].urgency, UrgencyTier::Later);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(UrgencyTier::from_days(0), UrgencyTier::Today);
        assert_eq!(UrgencyTier::from_days(1), UrgencyTier::ThisWeek);
        assert_eq!(UrgencyTier::from_days(7), UrgencyTier::ThisWeek);
        assert_eq!(UrgencyTier::from_days(8), UrgencyTier::ThisMonth);
        assert_eq!(UrgencyTier::from_days(30), UrgencyTier::ThisMonth);
        assert_eq!(UrgencyTier::from_days(31), UrgencyTier::Later);
    }

    #[test]
    fn test_countdown_labels() {
        let at = |date: &str| RankedReminder::new(reminder("X", date), today());

        assert_eq!(at("*-10-10").countdown(), "Today!");
        assert_eq!(at("*-10-11").countdown(), "Tomorrow");
        assert_eq!(at("*-11-09").countdown(), "30 days");
        assert_eq!(at("*-11-30").countdown(), "1 month");
        assert_eq!(at("*-01-10").countdown(), "3 months");
    }

    #[test]
    fn test_summary_counts() {
        let ranked = rank(
            vec![
                reminder("Today", "*-10-10"),
                reminder("Week", "*-10-17"),
                reminder("Month", "*-11-09"),
                reminder("Later", "*-11-10"),
            ],
            today(),
        );

        let summary = Summary::from_ranked(&ranked);
        assert_eq!(
            summary,
            Summary {
                total: 4,
                today: 1,
                this_week: 1,
                this_month: 3,
                later: 1,
            }
        );
    }

    #[test]
    fn test_due_alerts_respects_window() {
        let ranked = rank(
            vec![
                reminder("Soon", "*-10-13"),
                reminder("Edge", "*-10-17"),
                reminder("Far", "*-10-18"),
            ],
            today(),
        );

        assert_eq!(names(&due_alerts(&ranked, 7)), vec!["Soon", "Edge"]);
        assert_eq!(names(&due_alerts(&ranked, 1)), Vec::<&str>::new());
        assert_eq!(due_alerts(&ranked, 30).len(), 3);
    }

    #[test]
    fn test_ranked_turning_age() {
        let ranked = RankedReminder::new(reminder("Serena", "2001-10-15"), today());
        assert_eq!(ranked.turning_age(), Some(23));
    }
}
