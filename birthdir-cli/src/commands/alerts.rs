use anyhow::Result;
use birthdir_core::rank::{due_alerts, rank};
use birthdir_core::store::ReminderStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::render_reminders;

pub fn run<S: ReminderStore>(store: &S, days: u32, today: NaiveDate) -> Result<()> {
    let ranked = rank(store.list(), today);
    let due = due_alerts(&ranked, days);

    if due.is_empty() {
        println!(
            "{}",
            format!("No birthdays in the next {} {}", days, pluralize("day", days)).dimmed()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("🔔 Birthdays in the next {} {}", days, pluralize("day", days)).bold()
    );
    for line in render_reminders(&due, false) {
        println!("{line}");
    }

    Ok(())
}

fn pluralize(word: &str, count: u32) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
