//! Reminder storage.
//!
//! `ReminderStore` is the whole contract a backend has to satisfy. The
//! in-memory store holds the rules (validation, ids, ordering); `FileStore`
//! persists the same records to a TOML file.
//!
//! Mutations take `&mut self`, so a reader can never observe a half-applied
//! change. Sharing a store between tasks means wrapping it in a lock, in
//! which case concurrent `update`s are last-write-wins.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BirthdirError, BirthdirResult};
use crate::reminder::{Reminder, ReminderFields, ReminderId, ReminderPatch};

pub trait ReminderStore {
    /// Validate `fields`, assign a fresh id and append the record.
    fn create(&mut self, fields: ReminderFields) -> BirthdirResult<Reminder>;

    /// Merge `patch` into the record with `id`.
    fn update(&mut self, id: ReminderId, patch: ReminderPatch) -> BirthdirResult<Reminder>;

    /// Remove the record with `id`. Deleting an unknown id is an error.
    fn delete(&mut self, id: ReminderId) -> BirthdirResult<()>;

    /// Snapshot of every record in insertion order.
    fn list(&self) -> Vec<Reminder>;

    fn get(&self, id: ReminderId) -> BirthdirResult<Reminder> {
        self.list()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(BirthdirError::NotFound(id))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    reminders: Vec<Reminder>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting invalid or duplicate ones.
    pub fn from_reminders(reminders: Vec<Reminder>) -> BirthdirResult<Self> {
        let mut store = InMemoryStore::new();
        for reminder in reminders {
            reminder.validate()?;
            if store.position(reminder.id).is_some() {
                return Err(BirthdirError::Validation(format!(
                    "duplicate reminder id {}",
                    reminder.id
                )));
            }
            store.reminders.push(reminder);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    fn position(&self, id: ReminderId) -> Option<usize> {
        self.reminders.iter().position(|r| r.id == id)
    }

    fn fresh_id(&self) -> ReminderId {
        loop {
            let id = ReminderId::new();
            if self.position(id).is_none() {
                return id;
            }
        }
    }
}

impl ReminderStore for InMemoryStore {
    fn create(&mut self, fields: ReminderFields) -> BirthdirResult<Reminder> {
        let reminder = fields.into_reminder(self.fresh_id())?;
        debug!("Created reminder {} for {}", reminder.id, reminder.name);
        self.reminders.push(reminder.clone());
        Ok(reminder)
    }

    fn update(&mut self, id: ReminderId, patch: ReminderPatch) -> BirthdirResult<Reminder> {
        let index = self.position(id).ok_or(BirthdirError::NotFound(id))?;
        let updated = patch.apply(&self.reminders[index])?;
        debug!("Updated reminder {}", id);
        self.reminders[index] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: ReminderId) -> BirthdirResult<()> {
        let index = self.position(id).ok_or(BirthdirError::NotFound(id))?;
        self.reminders.remove(index);
        debug!("Deleted reminder {}", id);
        Ok(())
    }

    fn list(&self) -> Vec<Reminder> {
        self.reminders.clone()
    }

    fn get(&self, id: ReminderId) -> BirthdirResult<Reminder> {
        self.position(id)
            .map(|i| self.reminders[i].clone())
            .ok_or(BirthdirError::NotFound(id))
    }
}

/// On-disk layout of the reminders file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RemindersFile {
    #[serde(default, rename = "reminder")]
    reminders: Vec<Reminder>,
}

/// A store persisted to a TOML file after every mutation.
///
/// If writing fails the mutation is rolled back, so the in-memory state
/// always matches what is on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl FileStore {
    /// Load reminders from `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> BirthdirResult<Self> {
        let path = path.into();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: RemindersFile = toml::from_str(&content).map_err(|e| {
                BirthdirError::Serialization(format!("{}: {}", path.display(), e))
            })?;
            InMemoryStore::from_reminders(file.reminders)?
        } else {
            InMemoryStore::new()
        };

        debug!("Loaded {} reminders from {}", inner.len(), path.display());
        Ok(FileStore { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> BirthdirResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = RemindersFile {
            reminders: self.inner.list(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| BirthdirError::Serialization(e.to_string()))?;

        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Run `mutation` against the inner store and persist, restoring the
    /// previous state if the write fails.
    fn persist<T>(
        &mut self,
        mutation: impl FnOnce(&mut InMemoryStore) -> BirthdirResult<T>,
    ) -> BirthdirResult<T> {
        let snapshot = self.inner.clone();
        let result = mutation(&mut self.inner)?;

        if let Err(e) = self.save() {
            self.inner = snapshot;
            return Err(e);
        }

        Ok(result)
    }
}

impl ReminderStore for FileStore {
    fn create(&mut self, fields: ReminderFields) -> BirthdirResult<Reminder> {
        self.persist(|store| store.create(fields))
    }

    fn update(&mut self, id: ReminderId, patch: ReminderPatch) -> BirthdirResult<Reminder> {
        self.persist(|store| store.update(id, patch))
    }

    fn delete(&mut self, id: ReminderId) -> BirthdirResult<()> {
        self.persist(|store| store.delete(id))
    }

    fn list(&self) -> Vec<Reminder> {
        self.inner.list()
    }

    fn get(&self, id: ReminderId) -> BirthdirResult<Reminder> {
        self.inner.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_unique_ids_in_insertion_order() {
        let mut store = InMemoryStore::new();
        let a = store.create(ReminderFields::new("A", "*-10-15")).unwrap();
        let b = store.create(ReminderFields::new("B", "*-10-12")).unwrap();

        assert_ne!(a.id, b.id);
        let names: Vec<_> = store.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_create_with_empty_name_leaves_store_unchanged() {
        let mut store = InMemoryStore::new();
        store.create(ReminderFields::new("A", "*-10-15")).unwrap();

        let result = store.create(ReminderFields::new("", "*-10-15"));
        assert!(matches!(result, Err(BirthdirError::Validation(_))));
        assert_eq!(store.len(), 1);

        let result = store.create(ReminderFields {
            name: Some("B".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(BirthdirError::Validation(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_merges_and_keeps_position() {
        let mut store = InMemoryStore::new();
        let a = store.create(ReminderFields::new("A", "*-10-15")).unwrap();
        store.create(ReminderFields::new("B", "*-10-12")).unwrap();

        let patch = ReminderPatch {
            date: Some("*-01-02".into()),
            ..Default::default()
        };
        let updated = store.update(a.id, patch).unwrap();

        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, "A");
        assert_eq!(store.list()[0], updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut store = InMemoryStore::new();
        let id = ReminderId::new();
        let result = store.update(id, ReminderPatch::default());
        assert!(matches!(result, Err(BirthdirError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn test_invalid_update_leaves_record_untouched() {
        let mut store = InMemoryStore::new();
        let a = store.create(ReminderFields::new("A", "*-10-15")).unwrap();

        let patch = ReminderPatch {
            name: Some("Renamed".into()),
            date: Some("*-02-30".into()),
            ..Default::default()
        };
        assert!(matches!(store.update(a.id, patch), Err(BirthdirError::Validation(_))));
        assert_eq!(store.get(a.id).unwrap(), a);
    }

    #[test]
    fn test_delete_unknown_and_repeated_delete_are_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.delete(ReminderId::new()),
            Err(BirthdirError::NotFound(_))
        ));

        let a = store.create(ReminderFields::new("A", "*-10-15")).unwrap();
        store.delete(a.id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.delete(a.id), Err(BirthdirError::NotFound(_))));
    }

    #[test]
    fn test_from_reminders_rejects_duplicates() {
        let a = ReminderFields::new("A", "*-10-15")
            .into_reminder(ReminderId::new())
            .unwrap();
        let result = InMemoryStore::from_reminders(vec![a.clone(), a]);
        assert!(matches!(result, Err(BirthdirError::Validation(_))));
    }

    #[test]
    fn test_file_store_persists_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.toml");

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.list().is_empty());

        let a = store
            .create(ReminderFields::new("Serena", "2001-10-15").with_note("college"))
            .unwrap();
        let b = store.create(ReminderFields::new("Debbie", "*-10-20")).unwrap();
        store.delete(b.id).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.list(), vec![a]);
    }

    #[test]
    fn test_file_store_rolls_back_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes every write fail.
        let path = dir.path().join("reminders.toml");
        std::fs::create_dir(&path).unwrap();

        let mut store = FileStore {
            path,
            inner: InMemoryStore::new(),
        };
        assert!(store.create(ReminderFields::new("A", "*-10-15")).is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.toml");
        std::fs::write(&path, "[[reminder]]\nname = \"A\"\n").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(BirthdirError::Serialization(_))
        ));
    }
}
