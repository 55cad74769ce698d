use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::NoteFilter;
use crate::state::AppState;
use crate::store::StorageBackend;

/// Notes matching `filter`, most recent first. Never mutates the collection.
pub fn run<B: StorageBackend>(state: &AppState<B>, filter: &NoteFilter) -> Result<CmdResult> {
    let listed = filter.apply(state.notes()).into_iter().cloned().collect();
    Ok(CmdResult::default()
        .with_listed_notes(listed)
        .with_selected(state.selected()))
}
