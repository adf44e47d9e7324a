use super::backend::ChapterBackend;
use crate::error::{LanryError, Result};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Clone)]
struct FileEntry {
    text: String,
    mtime: DateTime<Utc>,
}

/// In-memory chapter backend for testing.
///
/// Uses `RefCell` for interior mutability since lanry is single-threaded.
/// This keeps every `ChapterBackend` method on `&self`, like the real filesystem.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<String, FileEntry>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
    simulate_list_error: Cell<bool>,
    list_calls: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn set_simulate_list_error(&self, simulate: bool) {
        self.simulate_list_error.set(simulate);
    }

    /// Remove a file behind the store's back.
    pub fn remove_file(&self, file_name: &str) -> bool {
        self.files.borrow_mut().remove(file_name).is_some()
    }

    /// Put a file in place without going through error simulation.
    pub fn put_file(&self, file_name: &str, text: &str) {
        self.files.borrow_mut().insert(
            file_name.to_string(),
            FileEntry {
                text: text.to_string(),
                mtime: Utc::now(),
            },
        );
    }

    /// How many directory listings have been requested.
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }
}

impl ChapterBackend for MemBackend {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(LanryError::Store("Simulated read error".to_string()));
        }
        Ok(self.files.borrow().get(file_name).map(|e| e.text.clone()))
    }

    fn write(&self, file_name: &str, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(LanryError::Store("Simulated write error".to_string()));
        }
        self.put_file(file_name, content);
        Ok(())
    }

    fn exists(&self, file_name: &str) -> bool {
        self.files.borrow().contains_key(file_name)
    }

    fn list_file_names(&self) -> Result<Vec<String>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.simulate_list_error.get() {
            return Err(LanryError::Store("Simulated list error".to_string()));
        }
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn modified_at(&self, file_name: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.files.borrow().get(file_name).map(|e| e.mtime))
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", file_name))
    }
}
