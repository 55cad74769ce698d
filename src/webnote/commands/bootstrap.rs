use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, Priority};
use crate::state::AppState;
use crate::store::StorageBackend;

pub const WELCOME_TITLE: &str = "Welcome to WebNote";
pub const WELCOME_CONTENT: &str = "<h2>Welcome to WebNote</h2><p>Use the Add Note button to create notes, attach images, add tags, and set priority.</p>";

/// Seeds a starter note into an empty collection, then makes sure something
/// is selected. Safe to call on every start.
pub fn run<B: StorageBackend>(state: &mut AppState<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut dirty = false;

    if state.notes().is_empty() {
        let id = state.new_id();
        let mut note = Note::new(id, Priority::Medium);
        note.title = WELCOME_TITLE.to_string();
        note.content = WELCOME_CONTENT.to_string();
        state.insert_front(note.clone());
        result = result.with_affected_notes(vec![note]);
        result.add_message(CmdMessage::info("Created a starter note."));
        dirty = true;
    }

    if state.selected().is_none() {
        if let Some(first) = state.notes().first().map(|n| n.id) {
            state.select(first);
            result = result.with_selected(Some(first));
            dirty = true;
        }
    }

    if dirty {
        state.save()?;
    }
    Ok(result)
}
