use super::backend::StorageBackend;
use crate::error::{Result, WebnoteError};
use crate::model::{Note, NoteId, TodoItem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Key holding the note collection as a JSON array.
pub const NOTES_KEY: &str = "webnote_notes_v1";
/// Key holding the to-do list as a JSON array.
pub const TODOS_KEY: &str = "webnote_todos_v1";
/// Key holding the id counter and the persisted selection.
pub const META_KEY: &str = "webnote_meta_v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreMeta {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    selected: Option<NoteId>,
}

/// Owns both record collections and moves them in and out of a backend.
///
/// The whole collection is the unit of persistence: `save` rewrites every
/// key, there are no per-record writes.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    notes: Vec<Note>,
    todos: Vec<TodoItem>,
    next_id: u64,
    saved_selection: Option<NoteId>,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn open(backend: B) -> Result<Self> {
        let notes: Vec<Note> = load_document(&backend, NOTES_KEY)?.unwrap_or_default();
        let todos: Vec<TodoItem> = load_document(&backend, TODOS_KEY)?.unwrap_or_default();
        let meta: StoreMeta = load_document(&backend, META_KEY)?.unwrap_or_default();

        let floor = notes.iter().map(|n| n.id.0 + 1).max().unwrap_or(1);
        let mut store = Self {
            backend,
            notes,
            todos,
            next_id: meta.next_id.max(floor),
            saved_selection: meta.selected,
        };
        store.repair_duplicate_ids();
        Ok(store)
    }

    /// Reads the note collection straight from the backend. Absent or
    /// malformed data yields an empty collection.
    pub fn load(&self) -> Result<Vec<Note>> {
        Ok(load_document(&self.backend, NOTES_KEY)?.unwrap_or_default())
    }

    /// Rewrites all keys from the in-memory state.
    pub fn save(&self, selected: Option<NoteId>) -> Result<()> {
        let notes = serde_json::to_string(&self.notes).map_err(WebnoteError::Serialization)?;
        self.backend.write(NOTES_KEY, &notes)?;

        let todos = serde_json::to_string(&self.todos).map_err(WebnoteError::Serialization)?;
        self.backend.write(TODOS_KEY, &todos)?;

        let meta = StoreMeta {
            next_id: self.next_id,
            selected,
        };
        let meta = serde_json::to_string(&meta).map_err(WebnoteError::Serialization)?;
        self.backend.write(META_KEY, &meta)?;

        Ok(())
    }

    pub fn new_id(&mut self) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut Vec<Note> {
        &mut self.notes
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn todos_mut(&mut self) -> &mut Vec<TodoItem> {
        &mut self.todos
    }

    /// The selection that was current at the last save.
    pub fn saved_selection(&self) -> Option<NoteId> {
        self.saved_selection
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // Collections written by the time-based id generator may contain
    // collisions; later duplicates get fresh ids.
    fn repair_duplicate_ids(&mut self) {
        let mut seen = HashSet::new();
        for i in 0..self.notes.len() {
            let id = self.notes[i].id;
            if !seen.insert(id) {
                let fresh = self.new_id();
                warn!(old = %id, new = %fresh, "duplicate note id, reassigning");
                self.notes[i].id = fresh;
                seen.insert(fresh);
            }
        }
    }
}

fn load_document<T: DeserializeOwned, B: StorageBackend>(
    backend: &B,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = backend.read(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            // The next save overwrites `key`; keep the unreadable text aside.
            let backup = backup_key(key);
            backend.write(&backup, &raw)?;
            warn!(key, backup = %backup, error = %e, "stored data is malformed, starting empty");
            Ok(None)
        }
    }
}

/// Key under which an unreadable document is copied before it is replaced.
pub fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::store::mem_backend::MemBackend;

    fn store_with_notes(count: u64) -> RecordStore<MemBackend> {
        let mut store = RecordStore::open(MemBackend::new()).unwrap();
        for _ in 0..count {
            let id = store.new_id();
            store.notes_mut().insert(0, Note::new(id, Priority::Medium));
        }
        store
    }

    #[test]
    fn absent_data_loads_empty() {
        let store = RecordStore::open(MemBackend::new()).unwrap();
        assert!(store.notes().is_empty());
        assert!(store.todos().is_empty());
        assert_eq!(store.saved_selection(), None);
    }

    #[test]
    fn malformed_data_loads_empty() {
        let backend = MemBackend::new();
        backend.insert_raw(NOTES_KEY, "{not json");
        backend.insert_raw(TODOS_KEY, "42");
        let store = RecordStore::open(backend).unwrap();
        assert!(store.notes().is_empty());
        assert!(store.todos().is_empty());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_backed_up_before_save() {
        let backend = MemBackend::new();
        let raw = r#"[{"id": 1, "title": "keep me", "created": 1, "updated": 1, "priority": "Urgent"}]"#;
        backend.insert_raw(NOTES_KEY, raw);
        let mut store = RecordStore::open(backend).unwrap();
        assert!(store.notes().is_empty());

        let id = store.new_id();
        store.notes_mut().push(Note::new(id, Priority::Low));
        store.save(Some(id)).unwrap();

        let backup = store.backend().read(&backup_key(NOTES_KEY)).unwrap();
        assert_eq!(backup.as_deref(), Some(raw));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn readable_documents_are_not_backed_up() {
        let store = store_with_notes(1);
        store.save(None).unwrap();
        let reopened = RecordStore::open(store.backend).unwrap();
        assert_eq!(reopened.backend().read(&backup_key(NOTES_KEY)).unwrap(), None);
    }

    #[test]
    fn save_then_load_is_lossless() {
        let mut store = store_with_notes(3);
        store.notes_mut()[1].tags = vec!["work".into(), "Work".into()];
        store.notes_mut()[1].attachments = vec!["data:image/png;base64,AAAA".into()];
        store.notes_mut()[2].things_to_remember = vec!["call back".into()];
        store
            .todos_mut()
            .push(TodoItem::new("Pay rent".into(), Priority::High, None));
        store.save(None).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, store.notes());

        let reopened = RecordStore::open(store.backend).unwrap();
        assert_eq!(reopened.load().unwrap(), loaded);
        assert_eq!(reopened.todos().len(), 1);
    }

    #[test]
    fn ids_keep_increasing_across_reopen() {
        let mut store = store_with_notes(2);
        store.save(None).unwrap();
        let highest = store.notes().iter().map(|n| n.id).max().unwrap();

        let mut reopened = RecordStore::open(store.backend).unwrap();
        assert!(reopened.new_id() > highest);
    }

    #[test]
    fn counter_starts_above_legacy_ids() {
        let backend = MemBackend::new();
        backend.insert_raw(
            NOTES_KEY,
            r#"[{"id": 1718000000123, "title": "t", "content": "", "created": 1, "updated": 2,
                 "priority": "Low", "tags": [], "attachments": [], "thingsToRemember": []}]"#,
        );
        let mut store = RecordStore::open(backend).unwrap();
        assert_eq!(store.new_id(), NoteId(1718000000124));
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let backend = MemBackend::new();
        backend.insert_raw(
            NOTES_KEY,
            r#"[{"id": 5, "created": 1, "updated": 1}, {"id": 5, "created": 1, "updated": 1}]"#,
        );
        let store = RecordStore::open(backend).unwrap();
        assert_eq!(store.notes()[0].id, NoteId(5));
        assert_eq!(store.notes()[1].id, NoteId(6));
    }

    #[test]
    fn selection_is_persisted_in_meta() {
        let store = store_with_notes(1);
        let id = store.notes()[0].id;
        store.save(Some(id)).unwrap();

        let reopened = RecordStore::open(store.backend).unwrap();
        assert_eq!(reopened.saved_selection(), Some(id));
    }

    #[test]
    fn write_errors_propagate() {
        let store = store_with_notes(1);
        store.backend().set_simulate_write_error(true);
        assert!(store.save(None).is_err());
    }
}
