use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NoteId;
use crate::state::AppState;
use crate::store::StorageBackend;
use tracing::debug;

pub const DELETE_PROMPT: &str = "Delete this note? This cannot be undone.";

/// Asks the user before a destructive operation.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirmer for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Removes a note after confirmation. Declining leaves everything as it was.
pub fn run<B: StorageBackend>(
    state: &mut AppState<B>,
    id: NoteId,
    confirmer: &mut dyn Confirmer,
) -> Result<CmdResult> {
    let Some(title) = state.note(id).map(|n| n.display_title().to_string()) else {
        debug!(%id, "delete: no such note");
        return Ok(CmdResult::default());
    };

    if !confirmer.confirm(DELETE_PROMPT) {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(res);
    }

    let removed = state.remove_note(id);
    state.save()?;

    let mut result = CmdResult::default()
        .with_affected_notes(removed.into_iter().collect())
        .with_selected(state.selected());
    result.add_message(CmdMessage::success(format!(
        "Note deleted ({}): {}",
        id, title
    )));
    Ok(result)
}
