//! # Storage Layer
//!
//! This module defines how webnote persists its records. Storage is split in two:
//!
//! - [`backend::StorageBackend`]: raw key-value I/O. Knows nothing about notes.
//! - [`record_store::RecordStore`]: owns the note and to-do collections and
//!   serializes them to well-known keys.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production file-based storage
//!   - Each key is one JSON file in the data directory
//!   - Writes go to a temp file first and are renamed into place
//!
//! - [`mem_backend::MemBackend`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── webnote_notes_v1.json   # All notes (JSON array)
//! ├── webnote_todos_v1.json   # All to-do items (JSON array)
//! ├── webnote_meta_v1.json    # Id counter and current selection
//! └── config.json             # User configuration
//! ```
//!
//! The notes document uses the same shape the browser widget kept in local
//! storage, so an exported `webnote_notes_v1` value can be dropped in as is.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::RecordStore;
