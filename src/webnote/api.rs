//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! webnote operations, whatever UI drives them.
//!
//! The facade:
//! - **Dispatches** to the command functions
//! - **Normalizes inputs** (1-based to-do positions to ids, file paths to data URIs)
//! - **Runs collaborators** (summarizer, speech) between the two phases of a job
//!
//! It never writes to stdout or stderr and holds no business logic.
//!
//! `WebnoteApi<B: StorageBackend>` is generic over the storage backend:
//! `FsBackend` in production, `MemBackend` in tests.

use crate::attachments;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::config::WebnoteConfig;
use crate::error::{Result, WebnoteError};
use crate::filter::NoteFilter;
use crate::model::{NoteId, NotePatch, Priority};
use crate::speech::{self, SpeechEngine};
use crate::state::AppState;
use crate::store::StorageBackend;
use crate::summarizer::Summarizer;
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::delete::Confirmer;

pub struct WebnoteApi<B: StorageBackend> {
    state: AppState<B>,
    config_dir: PathBuf,
    config: WebnoteConfig,
}

impl<B: StorageBackend> WebnoteApi<B> {
    /// Opens the store behind `backend` and reads `config.json` from `config_dir`.
    pub fn open(backend: B, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = WebnoteConfig::load(&config_dir)?;
        Ok(Self {
            state: AppState::open(backend)?,
            config_dir,
            config,
        })
    }

    pub fn bootstrap(&mut self) -> Result<CmdResult> {
        commands::bootstrap::run(&mut self.state)
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.state.selected()
    }

    pub fn settings(&self) -> &WebnoteConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState<B> {
        &self.state
    }

    /// Creates a note. Without an explicit priority the configured default is used.
    pub fn create_note(&mut self, priority: Option<Priority>) -> Result<CmdResult> {
        let priority = priority.unwrap_or(self.config.default_priority);
        commands::create::run(&mut self.state, priority)
    }

    pub fn select_note(&mut self, id: NoteId) -> Result<CmdResult> {
        commands::select::run(&mut self.state, id)
    }

    pub fn current(&self) -> CmdResult {
        commands::select::current(&self.state)
    }

    pub fn update_note(&mut self, id: NoteId, patch: &NotePatch) -> Result<CmdResult> {
        commands::update::run(&mut self.state, id, patch)
    }

    pub fn delete_note(&mut self, id: NoteId, confirmer: &mut dyn Confirmer) -> Result<CmdResult> {
        commands::delete::run(&mut self.state, id, confirmer)
    }

    /// Reads image files and attaches them to note `id`. Files that are not
    /// images are skipped.
    pub fn attach_files<P: AsRef<Path>>(&mut self, id: NoteId, paths: &[P]) -> Result<CmdResult> {
        let mut encoded = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            let path = path.as_ref();
            match attachments::read_image(path)? {
                Some(uri) => encoded.push(uri),
                None => skipped.push(path.display().to_string()),
            }
        }

        let mut result = commands::attach::run(&mut self.state, id, encoded)?;
        for name in skipped {
            result.add_message(CmdMessage::info(format!("Skipped non-image file: {}", name)));
        }
        Ok(result)
    }

    pub fn add_remembered(&mut self, id: NoteId, text: &str) -> Result<CmdResult> {
        commands::remember::run(&mut self.state, id, text)
    }

    pub fn commit_tags(&mut self, id: NoteId, raw_input: &str) -> Result<CmdResult> {
        commands::tagging::commit(&mut self.state, id, raw_input)
    }

    pub fn list_notes(&self, filter: &NoteFilter) -> Result<CmdResult> {
        commands::list::run(&self.state, filter)
    }

    pub fn add_todo(&mut self, text: &str, priority: Priority, deadline: &str) -> Result<CmdResult> {
        commands::todos::add(&mut self.state, text, priority, deadline, Utc::now())
    }

    /// Removes the to-do at 1-based position `index`.
    pub fn remove_todo(&mut self, index: usize) -> Result<CmdResult> {
        let id = self.resolve_todo(index)?;
        commands::todos::remove(&mut self.state, id)
    }

    pub fn set_todo_done(&mut self, index: usize, done: bool) -> Result<CmdResult> {
        let id = self.resolve_todo(index)?;
        commands::todos::set_done(&mut self.state, id, done)
    }

    pub fn list_todos(&self) -> Result<CmdResult> {
        commands::todos::list(&self.state)
    }

    /// Summarizes note `id` into a new note. When `speech` is given and
    /// `speak-summaries` is on, the summary is also read aloud.
    pub fn summarize(
        &mut self,
        id: NoteId,
        summarizer: &dyn Summarizer,
        speech: Option<&dyn SpeechEngine>,
    ) -> Result<CmdResult> {
        let Some(job) = commands::summarize::prepare(&self.state, id)? else {
            return Ok(CmdResult::default());
        };
        let summary = summarizer.summarize(&job.request)?;
        let result = commands::summarize::apply(&mut self.state, &job, &summary)?;

        if let Some(engine) = speech {
            if self.config.speak_summaries && !result.affected_notes.is_empty() {
                speech::speak_text(engine, &summary);
            }
        }
        Ok(result)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    fn resolve_todo(&self, index: usize) -> Result<Uuid> {
        index
            .checked_sub(1)
            .and_then(|i| self.state.todos().get(i))
            .map(|t| t.id)
            .ok_or_else(|| WebnoteError::TodoNotFound(index.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::Voice;
    use crate::store::mem_backend::MemBackend;
    use crate::summarizer::SummaryRequest;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct CannedSummarizer(&'static str);

    impl Summarizer for CannedSummarizer {
        fn summarize(&self, _request: &SummaryRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct DownSummarizer;

    impl Summarizer for DownSummarizer {
        fn summarize(&self, _request: &SummaryRequest) -> Result<String> {
            Err(WebnoteError::Network("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: RefCell<Vec<String>>,
    }

    impl SpeechEngine for RecordingSpeech {
        fn voices(&self) -> Result<Vec<Voice>> {
            Ok(vec![Voice {
                name: "Samantha".into(),
                lang: "en_US".into(),
            }])
        }

        fn speak(&self, text: &str, _voice: Option<&Voice>) -> Result<()> {
            self.spoken.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn api() -> (WebnoteApi<MemBackend>, TempDir) {
        let dir = TempDir::new().unwrap();
        let api = WebnoteApi::open(MemBackend::new(), dir.path()).unwrap();
        (api, dir)
    }

    fn note_with_content(api: &mut WebnoteApi<MemBackend>, content: &str) -> NoteId {
        let id = api.create_note(None).unwrap().affected_notes[0].id;
        api.update_note(id, &NotePatch::default().with_title("Src").with_content(content))
            .unwrap();
        id
    }

    #[test]
    fn create_uses_configured_default_priority() {
        let (mut api, _dir) = api();
        api.config(ConfigAction::Set("default-priority".into(), "high".into()))
            .unwrap();
        let res = api.create_note(None).unwrap();
        assert_eq!(res.affected_notes[0].priority, Priority::High);
        let res = api.create_note(Some(Priority::Low)).unwrap();
        assert_eq!(res.affected_notes[0].priority, Priority::Low);
    }

    #[test]
    fn todo_positions_resolve_to_items() {
        let (mut api, _dir) = api();
        api.add_todo("one", Priority::Low, "").unwrap();
        api.add_todo("two", Priority::Low, "").unwrap();

        api.set_todo_done(2, true).unwrap();
        assert!(api.state().todos()[1].done);

        api.remove_todo(1).unwrap();
        assert_eq!(api.state().todos()[0].text, "two");
    }

    #[test]
    fn unknown_todo_position_is_an_error() {
        let (mut api, _dir) = api();
        api.add_todo("one", Priority::Low, "").unwrap();
        assert!(matches!(api.remove_todo(0), Err(WebnoteError::TodoNotFound(_))));
        assert!(matches!(
            api.set_todo_done(2, true),
            Err(WebnoteError::TodoNotFound(_))
        ));
    }

    #[test]
    fn summarize_saves_and_speaks() {
        let (mut api, _dir) = api();
        let id = note_with_content(&mut api, "<p>long text</p>");
        let speech = RecordingSpeech::default();

        let res = api
            .summarize(id, &CannedSummarizer("short"), Some(&speech))
            .unwrap();
        assert_eq!(res.affected_notes[0].title, "Src (Summary)");
        assert_eq!(*speech.spoken.borrow(), vec!["short".to_string()]);
    }

    #[test]
    fn summarize_respects_speak_setting() {
        let (mut api, _dir) = api();
        api.config(ConfigAction::Set("speak-summaries".into(), "false".into()))
            .unwrap();
        let id = note_with_content(&mut api, "<p>long text</p>");
        let speech = RecordingSpeech::default();
        api.summarize(id, &CannedSummarizer("short"), Some(&speech))
            .unwrap();
        assert!(speech.spoken.borrow().is_empty());
    }

    #[test]
    fn summarize_failure_changes_nothing() {
        let (mut api, _dir) = api();
        let id = note_with_content(&mut api, "<p>long text</p>");
        let err = api.summarize(id, &DownSummarizer, None).unwrap_err();
        assert!(matches!(err, WebnoteError::Network(_)));
        assert_eq!(api.state().notes().len(), 1);
    }

    #[test]
    fn attach_files_skips_non_images() {
        let (mut api, dir) = api();
        let id = api.create_note(None).unwrap().affected_notes[0].id;
        let img = dir.path().join("a.gif");
        let txt = dir.path().join("b.txt");
        std::fs::write(&img, b"GIF89a").unwrap();
        std::fs::write(&txt, b"text").unwrap();

        let res = api.attach_files(id, &[&img, &txt]).unwrap();
        let note = api.state().note(id).unwrap();
        assert_eq!(note.attachments.len(), 1);
        assert!(note.attachments[0].starts_with("data:image/gif;base64,"));
        assert!(res
            .messages
            .iter()
            .any(|m| m.content.starts_with("Skipped non-image file")));
    }

    #[test]
    fn bootstrap_then_tag_and_search() {
        let (mut api, _dir) = api();
        api.bootstrap().unwrap();
        let id = api.selected().unwrap();
        api.commit_tags(id, "intro, help").unwrap();

        let res = api.list_notes(&NoteFilter::tags("INTRO")).unwrap();
        assert_eq!(res.listed_notes.len(), 1);
        let res = api.list_notes(&NoteFilter::text("add note")).unwrap();
        assert_eq!(res.listed_notes.len(), 1);
    }
}
