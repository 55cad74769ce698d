use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{NoteId, NotePatch};
use crate::state::AppState;
use crate::store::StorageBackend;
use crate::tags::dedup_tags;
use tracing::debug;

/// Overwrites the fields present in `patch` and refreshes `updated`.
///
/// A no-op when nothing is selected or `id` does not exist.
pub fn run<B: StorageBackend>(
    state: &mut AppState<B>,
    id: NoteId,
    patch: &NotePatch,
) -> Result<CmdResult> {
    if state.selected().is_none() {
        debug!(%id, "update: nothing selected");
        return Ok(CmdResult::default());
    }
    let Some(note) = state.note_mut(id) else {
        debug!(%id, "update: no such note");
        return Ok(CmdResult::default());
    };

    if let Some(title) = &patch.title {
        note.title = title.clone();
    }
    if let Some(content) = &patch.content {
        note.content = content.clone();
    }
    if let Some(priority) = patch.priority {
        note.priority = priority;
    }
    if let Some(tags) = &patch.tags {
        note.tags = dedup_tags(tags.iter().cloned());
    }
    note.touch();

    let updated = note.clone();
    state.save()?;

    let mut result = CmdResult::default().with_affected_notes(vec![updated.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Note updated ({}): {}",
        updated.id,
        updated.display_title()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::delete;
    use crate::model::Priority;
    use crate::store::mem_backend::fixtures::StateFixture;

    #[test]
    fn overwrites_only_given_fields() {
        let mut state = StateFixture::new()
            .with_note("Title", "<p>Old</p>", &["a"])
            .state;
        let id = state.notes()[0].id;

        let patch = NotePatch::default().with_content("<p>New</p>");
        run(&mut state, id, &patch).unwrap();

        let note = state.note(id).unwrap();
        assert_eq!(note.title, "Title");
        assert_eq!(note.content, "<p>New</p>");
        assert_eq!(note.tags, vec!["a".to_string()]);
    }

    #[test]
    fn repeated_patch_only_moves_updated_forward() {
        let mut state = StateFixture::new().with_notes(1).state;
        let id = state.notes()[0].id;
        let patch = NotePatch::default()
            .with_title("Same")
            .with_priority(Priority::High);

        run(&mut state, id, &patch).unwrap();
        let first = state.note(id).unwrap().clone();
        run(&mut state, id, &patch).unwrap();
        let second = state.note(id).unwrap().clone();

        assert!(second.updated > first.updated);
        let mut normalized = second.clone();
        normalized.updated = first.updated;
        assert_eq!(normalized, first);
    }

    #[test]
    fn patch_tags_are_deduplicated() {
        let mut state = StateFixture::new().with_notes(1).state;
        let id = state.notes()[0].id;
        let patch = NotePatch::default().with_tags(vec!["x".into(), "y".into(), "x".into()]);
        run(&mut state, id, &patch).unwrap();
        assert_eq!(state.note(id).unwrap().tags, vec!["x", "y"]);
    }

    #[test]
    fn noop_without_selection() {
        let mut state = StateFixture::new().with_notes(1).state;
        let id = state.notes()[0].id;
        delete::run(&mut state, id, &mut |_: &str| true).unwrap();
        assert_eq!(state.selected(), None);

        let res = run(&mut state, id, &NotePatch::default().with_title("x")).unwrap();
        assert!(res.is_noop());
        assert!(state.notes().is_empty());
    }

    #[test]
    fn noop_for_unknown_id() {
        let mut state = StateFixture::new().with_notes(1).state;
        let before = state.notes()[0].clone();
        let res = run(&mut state, NoteId(999), &NotePatch::default().with_title("x")).unwrap();
        assert!(res.is_noop());
        assert_eq!(state.notes()[0], before);
    }
}
