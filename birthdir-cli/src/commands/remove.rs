use anyhow::Result;
use birthdir_core::store::ReminderStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::resolve_id;

pub fn run<S: ReminderStore>(store: &mut S, id: &str, yes: bool) -> Result<()> {
    let id = resolve_id(&*store, id)?;
    let reminder = store.get(id)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", reminder))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    store.delete(id)?;
    println!("{} {}", "Deleted".red(), reminder.name);
    Ok(())
}
