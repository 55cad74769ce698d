use crate::commands::{update, CmdResult};
use crate::error::Result;
use crate::model::{NoteId, NotePatch};
use crate::state::AppState;
use crate::store::StorageBackend;
use crate::tags::{merge_tags, parse_tag_input};
use tracing::debug;

/// Adds comma-separated tags to a note, keeping existing tags first.
pub fn commit<B: StorageBackend>(
    state: &mut AppState<B>,
    id: NoteId,
    raw_input: &str,
) -> Result<CmdResult> {
    let incoming = parse_tag_input(raw_input);
    if incoming.is_empty() {
        return Ok(CmdResult::default());
    }
    let Some(note) = state.note(id) else {
        debug!(%id, "tag: no such note");
        return Ok(CmdResult::default());
    };

    let merged = merge_tags(&note.tags, incoming);
    update::run(state, id, &NotePatch::default().with_tags(merged))
}
