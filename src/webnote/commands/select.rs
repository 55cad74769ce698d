use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::StorageBackend;
use tracing::debug;

/// Selects a note and hands the full record back. Unknown ids are ignored.
pub fn run<B: StorageBackend>(state: &mut AppState<B>, id: NoteId) -> Result<CmdResult> {
    if !state.select(id) {
        debug!(%id, "select: no such note");
        return Ok(CmdResult::default());
    }
    state.save()?;

    let note = state.note(id).cloned().into_iter().collect();
    Ok(CmdResult::default()
        .with_listed_notes(note)
        .with_selected(Some(id)))
}

/// The currently selected note, if any. Does not change anything.
pub fn current<B: StorageBackend>(state: &AppState<B>) -> CmdResult {
    match state.selected_note() {
        Some(note) => CmdResult::default()
            .with_listed_notes(vec![note.clone()])
            .with_selected(Some(note.id)),
        None => CmdResult::default(),
    }
}
