use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::StorageBackend;
use tracing::debug;

/// Adds a "thing to remember" to a note. Blank text is ignored; repeats are kept.
pub fn run<B: StorageBackend>(state: &mut AppState<B>, id: NoteId, text: &str) -> Result<CmdResult> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(CmdResult::default());
    }
    let Some(note) = state.note_mut(id) else {
        debug!(%id, "remember: no such note");
        return Ok(CmdResult::default());
    };

    note.things_to_remember.push(text.to_string());
    note.touch();
    let updated = note.clone();
    state.save()?;

    let mut result = CmdResult::default().with_affected_notes(vec![updated]);
    result.add_message(CmdMessage::success(format!("Remembered: {}", text)));
    Ok(result)
}
