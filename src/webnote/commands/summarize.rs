//! Summaries are produced in two phases.
//!
//! [`prepare`] turns a note into a [`SummaryJob`] tagged with the note's id.
//! The caller hands the request to a [`crate::summarizer::Summarizer`] and
//! feeds the answer to [`apply`], which only writes anything if the source
//! note still exists. The current selection plays no part in that check.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WebnoteError};
use crate::model::{Note, NoteId};
use crate::state::AppState;
use crate::store::StorageBackend;
use crate::summarizer::SummaryRequest;
use tracing::{debug, warn};

pub const NOTHING_TO_SUMMARIZE: &str = "No content to summarize.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryJob {
    pub source_id: NoteId,
    pub request: SummaryRequest,
}

pub fn prepare<B: StorageBackend>(state: &AppState<B>, id: NoteId) -> Result<Option<SummaryJob>> {
    let Some(note) = state.note(id) else {
        debug!(%id, "summarize: no such note");
        return Ok(None);
    };

    // The service strips markup itself; plain text only decides whether
    // there is anything to send.
    if strip_tags(&note.content).is_empty() {
        return Err(WebnoteError::Validation(NOTHING_TO_SUMMARIZE.to_string()));
    }

    Ok(Some(SummaryJob {
        source_id: id,
        request: SummaryRequest {
            title: note.display_title().to_string(),
            content: note.content.clone(),
        },
    }))
}

pub fn apply<B: StorageBackend>(
    state: &mut AppState<B>,
    job: &SummaryJob,
    summary: &str,
) -> Result<CmdResult> {
    let Some(source) = state.note(job.source_id) else {
        warn!(id = %job.source_id, "summary arrived for a deleted note, dropping it");
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Note {} was deleted before its summary arrived.",
            job.source_id
        )));
        return Ok(result);
    };
    let priority = source.priority;
    let summary_title = format!("{} (Summary)", job.request.title);

    let id = state.new_id();
    let mut note = Note::new(id, priority);
    note.content = format!(
        "<h3>{}</h3><p>{}</p>",
        escape_html(&summary_title),
        escape_html(summary)
    );
    note.title = summary_title.clone();

    state.insert_front(note.clone());
    state.select(id);
    state.save()?;

    let mut result = CmdResult::default()
        .with_affected_notes(vec![note])
        .with_selected(Some(id));
    result.add_message(CmdMessage::success(format!(
        "Summary saved as a new note: {}",
        summary_title
    )));
    Ok(result)
}

/// Plain text of a markup fragment: tags dropped, common entities decoded,
/// whitespace collapsed.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
