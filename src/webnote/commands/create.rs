use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Note, Priority};
use crate::state::AppState;
use crate::store::StorageBackend;

/// Creates a note with factory defaults at the front of the collection and
/// selects it.
pub fn run<B: StorageBackend>(state: &mut AppState<B>, priority: Priority) -> Result<CmdResult> {
    let id = state.new_id();
    let note = Note::new(id, priority);
    state.insert_front(note.clone());
    state.select(id);
    state.save()?;

    let mut result = CmdResult::default()
        .with_affected_notes(vec![note])
        .with_selected(Some(id));
    result.add_message(CmdMessage::success(format!("Note created ({})", id)));
    Ok(result)
}
