use anyhow::Result;
use birthdir_core::ReminderFields;
use birthdir_core::rank::RankedReminder;
use birthdir_core::store::ReminderStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::Render;

#[allow(clippy::too_many_arguments)]
pub fn run<S: ReminderStore>(
    store: &mut S,
    name: String,
    date: String,
    age: Option<u32>,
    note: Option<String>,
    contact: Option<String>,
    avatar_ref: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let fields = ReminderFields {
        name: Some(name),
        date: Some(date),
        age,
        note,
        contact,
        avatar_ref,
    };

    let reminder = store.create(fields)?;

    println!("{}", "Birthday added".green());
    println!("  {}", RankedReminder::new(reminder, today).render());
    Ok(())
}
