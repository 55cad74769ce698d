use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::StorageBackend;
use tracing::debug;

/// Appends already-encoded attachments (data URIs) to the note they were
/// read for. If that note has gone away in the meantime, the data is
/// dropped; the current selection plays no part.
pub fn run<B: StorageBackend>(
    state: &mut AppState<B>,
    id: NoteId,
    attachments: Vec<String>,
) -> Result<CmdResult> {
    if attachments.is_empty() {
        return Ok(CmdResult::default());
    }
    let Some(note) = state.note_mut(id) else {
        debug!(%id, count = attachments.len(), "attach: target note is gone, dropping");
        return Ok(CmdResult::default());
    };

    let count = attachments.len();
    note.attachments.extend(attachments);
    note.touch();
    let updated = note.clone();
    state.save()?;

    let mut result = CmdResult::default().with_affected_notes(vec![updated]);
    result.add_message(CmdMessage::success(format!(
        "Attached {} image(s) to note {}",
        count, id
    )));
    Ok(result)
}
