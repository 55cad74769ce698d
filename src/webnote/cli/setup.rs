use clap::{Parser, Subcommand};
use std::path::PathBuf;
use webnote::model::{NoteId, Priority};

#[derive(Parser, Debug)]
#[command(name = "webnote", version)]
#[command(about = "Notes, tags, to-dos and summaries from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding notes, to-dos and config (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note and select it
    #[command(alias = "n")]
    New {
        /// Priority (low, medium, high); defaults to the configured one
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Title for the new note
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List notes, most recent first
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text in title or content
        #[arg(short, long)]
        search: Option<String>,

        /// Comma-separated tags; every one must match
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Select a note
    Select { id: NoteId },

    /// Show a note in full (the selected one by default)
    #[command(alias = "v")]
    View { id: Option<NoteId> },

    /// Change fields of a note (the selected one by default)
    #[command(alias = "e")]
    Edit {
        #[arg(long)]
        id: Option<NoteId>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Delete a note (the selected one by default)
    #[command(alias = "rm")]
    Delete {
        id: Option<NoteId>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add comma-separated tags to a note
    Tag {
        raw: String,

        #[arg(long)]
        id: Option<NoteId>,
    },

    /// Attach image files to a note
    Attach {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        #[arg(long)]
        id: Option<NoteId>,
    },

    /// Add a line to a note's things to remember
    Remember {
        text: String,

        #[arg(long)]
        id: Option<NoteId>,
    },

    /// Summarize a note into a new note
    Summarize {
        id: Option<NoteId>,

        /// Do not read the summary aloud
        #[arg(long)]
        no_speak: bool,
    },

    /// Manage the to-do list
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. summarize-url)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Add a to-do item
    Add {
        text: String,

        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Deadline as YYYY-MM-DDTHH:MM (local time) or RFC 3339
        #[arg(short, long, default_value = "")]
        deadline: String,
    },

    /// List to-do items
    #[command(alias = "ls")]
    List,

    /// Mark an item done
    Done { index: usize },

    /// Mark an item not done
    Undone { index: usize },

    /// Remove an item
    #[command(alias = "rm")]
    Remove { index: usize },
}
