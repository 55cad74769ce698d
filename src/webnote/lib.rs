//! # Webnote Architecture
//!
//! Webnote is a **UI-agnostic note and to-do library**. The command-line
//! client in `cli/` is one way to drive it; anything else that can call Rust
//! functions is another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (to-do positions → ids, paths → URIs)  │
//! │  - Runs the summarizer and speech collaborators             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over AppState                        │
//! │  - Returns CmdResult with messages for the UI               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State + Storage (state.rs, store/)                         │
//! │  - AppState: records plus the current selection             │
//! │  - StorageBackend trait: FsBackend, MemBackend (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments and returns
//! `Result<CmdResult>`. It never prints and never exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Missing records
//!
//! An operation naming a note that no longer exists does nothing and reports
//! nothing: the command returns an empty [`commands::CmdResult`]. Rejected input
//! is different and comes back as [`error::WebnoteError::Validation`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`state`]: Records plus selection
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Note`, `TodoItem`, `Priority`)
//! - [`tags`], [`filter`]: Tag parsing and note search
//! - [`attachments`]: Image files to data URIs
//! - [`summarizer`]: HTTP client for the summarization service
//! - [`speech`]: Text-to-speech playback
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attachments;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod speech;
pub mod state;
pub mod store;
pub mod summarizer;
pub mod tags;
