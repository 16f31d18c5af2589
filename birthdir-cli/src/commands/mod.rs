pub mod add;
pub mod alerts;
pub mod config;
pub mod edit;
pub mod holidays;
pub mod list;
pub mod remove;

use anyhow::Result;
use birthdir_core::ReminderId;
use birthdir_core::store::ReminderStore;

/// Resolve a full reminder id or a unique prefix of one.
pub fn resolve_id<S: ReminderStore>(store: &S, input: &str) -> Result<ReminderId> {
    if let Ok(id) = ReminderId::parse(input) {
        return Ok(id);
    }

    let prefix = input.trim().to_lowercase();
    if prefix.is_empty() {
        anyhow::bail!("Reminder id is empty");
    }

    let matches: Vec<_> = store
        .list()
        .into_iter()
        .filter(|r| r.id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.id),
        [] => anyhow::bail!("No reminder with id '{}'", input),
        _ => {
            let names: Vec<_> = matches
                .iter()
                .map(|r| format!("{} ({})", r.name, r.id.short()))
                .collect();
            anyhow::bail!(
                "Id '{}' matches several reminders: {}",
                input,
                names.join(", ")
            )
        }
    }
}
