//! # CLI Layer
//!
//! This module is **one possible UI client** for webnote, not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Uses `std::process::exit` (through `main.rs`)
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API over the data directory
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::print::{print_config, print_full_note, print_messages, print_notes, print_todos};
use super::setup::{Cli, Commands, TodoCommands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webnote::api::{ConfigAction, WebnoteApi};
use webnote::error::{Result, WebnoteError};
use webnote::filter::NoteFilter;
use webnote::model::{NoteId, NotePatch, Priority};
use webnote::speech::{CommandSpeech, SpeechEngine};
use webnote::store::fs_backend::FsBackend;
use webnote::summarizer::HttpSummarizer;

struct AppContext {
    api: WebnoteApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::New { priority, title }) => handle_new(&mut ctx, priority, title),
        Some(Commands::List { search, tags }) => handle_list(&mut ctx, search, tags),
        Some(Commands::Select { id }) => handle_select(&mut ctx, id),
        Some(Commands::View { id }) => handle_view(&mut ctx, id),
        Some(Commands::Edit {
            id,
            title,
            content,
            priority,
        }) => handle_edit(&mut ctx, id, title, content, priority),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, id, yes),
        Some(Commands::Tag { raw, id }) => handle_tag(&mut ctx, id, raw),
        Some(Commands::Attach { files, id }) => handle_attach(&mut ctx, id, files),
        Some(Commands::Remember { text, id }) => handle_remember(&mut ctx, id, text),
        Some(Commands::Summarize { id, no_speak }) => handle_summarize(&mut ctx, id, no_speak),
        Some(Commands::Todo(cmd)) => handle_todo(&mut ctx, cmd),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, None),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "webnote", "webnote")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                WebnoteError::Config("Could not determine a data directory".to_string())
            })?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "opening store");

    let mut api = WebnoteApi::open(FsBackend::new(data_dir.clone()), data_dir)?;
    api.bootstrap()?;
    Ok(AppContext { api })
}

/// The note a command acts on: the explicit id, else the selection.
fn target(ctx: &AppContext, id: Option<NoteId>) -> Option<NoteId> {
    id.or_else(|| ctx.api.selected())
}

fn handle_new(ctx: &mut AppContext, priority: Option<Priority>, title: Option<String>) -> Result<()> {
    let result = ctx.api.create_note(priority)?;
    print_messages(&result.messages);

    if let (Some(title), Some(note)) = (title, result.affected_notes.first()) {
        let result = ctx
            .api
            .update_note(note.id, &NotePatch::default().with_title(title))?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, tags: Option<String>) -> Result<()> {
    let filter = NoteFilter { text: search, tags };
    let result = ctx.api.list_notes(&filter)?;
    print_notes(&result.listed_notes, result.selected);
    print_messages(&result.messages);
    Ok(())
}

fn handle_select(ctx: &mut AppContext, id: NoteId) -> Result<()> {
    let result = ctx.api.select_note(id)?;
    if result.is_noop() {
        println!("No note with id {}.", id);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: Option<NoteId>) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        println!("No note selected.");
        return Ok(());
    };
    match ctx.api.state().note(id) {
        Some(note) => print_full_note(note),
        None => println!("No note with id {}.", id),
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: Option<NoteId>,
    title: Option<String>,
    content: Option<String>,
    priority: Option<Priority>,
) -> Result<()> {
    let patch = NotePatch {
        title,
        content,
        priority,
        tags: None,
    };
    if patch.is_empty() {
        println!("Nothing to change. Pass --title, --content or --priority.");
        return Ok(());
    }
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let result = ctx.api.update_note(id, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: Option<NoteId>, yes: bool) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let result = if yes {
        ctx.api.delete_note(id, &mut |_: &str| true)?
    } else {
        ctx.api.delete_note(id, &mut prompt_yes_no)?
    };
    print_messages(&result.messages);
    Ok(())
}

/// Asks on stdin. Anything but an explicit yes declines, including a closed stdin.
fn prompt_yes_no(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn handle_tag(ctx: &mut AppContext, id: Option<NoteId>, raw: String) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let result = ctx.api.commit_tags(id, &raw)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_attach(ctx: &mut AppContext, id: Option<NoteId>, files: Vec<PathBuf>) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let result = ctx.api.attach_files(id, &files)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remember(ctx: &mut AppContext, id: Option<NoteId>, text: String) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let result = ctx.api.add_remembered(id, &text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_summarize(ctx: &mut AppContext, id: Option<NoteId>, no_speak: bool) -> Result<()> {
    let Some(id) = target(ctx, id) else {
        return Ok(());
    };
    let summarizer = HttpSummarizer::from_config(ctx.api.settings());
    let speech = CommandSpeech;
    let engine: Option<&dyn SpeechEngine> = if no_speak { None } else { Some(&speech) };

    println!("Summarizing...");
    let result = ctx.api.summarize(id, &summarizer, engine)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_todo(ctx: &mut AppContext, cmd: TodoCommands) -> Result<()> {
    let result = match cmd {
        TodoCommands::Add {
            text,
            priority,
            deadline,
        } => ctx.api.add_todo(&text, priority, &deadline)?,
        TodoCommands::List => {
            let result = ctx.api.list_todos()?;
            print_todos(&result.listed_todos);
            return Ok(());
        }
        TodoCommands::Done { index } => ctx.api.set_todo_done(index, true)?,
        TodoCommands::Undone { index } => ctx.api.set_todo_done(index, false)?,
        TodoCommands::Remove { index } => ctx.api.remove_todo(index)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
