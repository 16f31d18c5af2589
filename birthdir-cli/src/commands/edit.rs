use anyhow::Result;
use birthdir_core::ReminderPatch;
use birthdir_core::rank::RankedReminder;
use birthdir_core::store::ReminderStore;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use super::resolve_id;
use crate::render::Render;

/// Fields given on the command line. An empty string clears an optional field.
pub struct Patch {
    pub name: Option<String>,
    pub date: Option<String>,
    pub age: Option<u32>,
    pub note: Option<String>,
    pub contact: Option<String>,
    pub avatar: Option<String>,
}

impl From<Patch> for ReminderPatch {
    fn from(patch: Patch) -> Self {
        ReminderPatch {
            name: patch.name,
            date: patch.date,
            age: patch.age,
            note: patch.note.map(Some),
            contact: patch.contact.map(Some),
            avatar_ref: patch.avatar.map(Some),
        }
    }
}

pub fn run<S: ReminderStore>(store: &mut S, id: &str, patch: Patch, today: NaiveDate) -> Result<()> {
    let id = resolve_id(&*store, id)?;
    let patch = ReminderPatch::from(patch);

    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --name, --date, --age, --note, --contact, --avatar");
    }

    let reminder = store.update(id, patch)?;

    println!("{}", "Birthday updated".green());
    println!("  {}", RankedReminder::new(reminder, today).render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use birthdir_core::ReminderFields;
    use birthdir_core::store::InMemoryStore;

    #[test]
    fn test_empty_string_clears_optional_field() {
        let mut store = InMemoryStore::new();
        let a = store
            .create(ReminderFields::new("A", "*-10-15").with_note("old note"))
            .unwrap();

        let patch = Patch {
            name: None,
            date: None,
            age: Some(30),
            note: Some(String::new()),
            contact: None,
            avatar: None,
        };
        let updated = store.update(a.id, ReminderPatch::from(patch)).unwrap();

        assert_eq!(updated.note, None);
        assert_eq!(updated.age, 30);
        assert_eq!(updated.name, "A");
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        let mut store = InMemoryStore::new();
        let a = store.create(ReminderFields::new("A", "*-10-15")).unwrap();
        let patch = Patch {
            name: None,
            date: None,
            age: None,
            note: None,
            contact: None,
            avatar: None,
        };

        let today = NaiveDate::from_ymd_opt(2024, 10, 10).unwrap();
        assert!(run(&mut store, &a.id.to_string(), patch, today).is_err());
    }
}
