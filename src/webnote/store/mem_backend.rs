use super::backend::StorageBackend;
use crate::error::{Result, WebnoteError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since webnote is single-threaded,
/// which lets the `StorageBackend` trait use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw value, e.g. a corrupt document.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(WebnoteError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(key, value);
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::commands::{create, update};
    use crate::model::{NotePatch, Priority};
    use crate::state::AppState;

    use super::MemBackend;

    pub struct StateFixture {
        pub state: AppState<MemBackend>,
    }

    impl Default for StateFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StateFixture {
        pub fn new() -> Self {
            Self {
                state: AppState::open(MemBackend::new()).unwrap(),
            }
        }

        /// Adds `count` notes titled "Test Note N". The last one created ends
        /// up first in the collection and selected.
        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                self = self.with_note(&format!("Test Note {}", i + 1), "", &[]);
            }
            self
        }

        pub fn with_note(mut self, title: &str, content: &str, tags: &[&str]) -> Self {
            let id = create::run(&mut self.state, Priority::Medium)
                .unwrap()
                .affected_notes[0]
                .id;
            let patch = NotePatch::default()
                .with_title(title)
                .with_content(content)
                .with_tags(tags.iter().map(|t| t.to_string()).collect());
            update::run(&mut self.state, id, &patch).unwrap();
            self
        }
    }
}
