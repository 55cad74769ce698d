use crate::config::WebnoteConfig;
use crate::model::{Note, NoteId, TodoItem};

pub mod attach;
pub mod bootstrap;
pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod remember;
pub mod select;
pub mod summarize;
pub mod tagging;
pub mod todos;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command did, for the presentation layer to render.
///
/// An empty result means the command was a no-op (e.g. it referenced a note
/// that does not exist).
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Notes created or modified, in their post-command state.
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub listed_todos: Vec<TodoItem>,
    /// Selection after the command, when the command touched it.
    pub selected: Option<NoteId>,
    pub config: Option<WebnoteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_listed_todos(mut self, todos: Vec<TodoItem>) -> Self {
        self.listed_todos = todos;
        self
    }

    pub fn with_selected(mut self, selected: Option<NoteId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_config(mut self, config: WebnoteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.affected_notes.is_empty()
            && self.listed_notes.is_empty()
            && self.listed_todos.is_empty()
            && self.selected.is_none()
            && self.config.is_none()
            && self.messages.is_empty()
    }
}
