//! Application state: the record store plus the current selection.
//!
//! Every command receives `&mut AppState`; nothing else holds notes or the
//! selection. The selection is kept valid here: it only ever names a note
//! that exists in the store.

use crate::error::Result;
use crate::model::{Note, NoteId, TodoItem};
use crate::store::{RecordStore, StorageBackend};

pub struct AppState<B: StorageBackend> {
    store: RecordStore<B>,
    selected: Option<NoteId>,
}

impl<B: StorageBackend> AppState<B> {
    pub fn open(backend: B) -> Result<Self> {
        let store = RecordStore::open(backend)?;
        let selected = store
            .saved_selection()
            .filter(|id| store.notes().iter().any(|n| n.id == *id));
        Ok(Self { store, selected })
    }

    /// Notes, most recent first.
    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    /// To-do items, oldest first.
    pub fn todos(&self) -> &[TodoItem] {
        self.store.todos()
    }

    pub fn todos_mut(&mut self) -> &mut Vec<TodoItem> {
        self.store.todos_mut()
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.notes().iter().find(|n| n.id == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.store.notes_mut().iter_mut().find(|n| n.id == id)
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.note(id))
    }

    /// Selects `id` if it exists. Returns false, leaving the selection alone, otherwise.
    pub fn select(&mut self, id: NoteId) -> bool {
        if self.note(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn new_id(&mut self) -> NoteId {
        self.store.new_id()
    }

    pub fn insert_front(&mut self, note: Note) {
        self.store.notes_mut().insert(0, note);
    }

    /// Removes a note. If it was selected, the selection moves to the new
    /// first note, or to none when the collection is empty.
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let notes = self.store.notes_mut();
        let idx = notes.iter().position(|n| n.id == id)?;
        let removed = notes.remove(idx);

        if self.selected == Some(id) {
            self.selected = self.store.notes().first().map(|n| n.id);
        }
        Some(removed)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(self.selected)
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}
