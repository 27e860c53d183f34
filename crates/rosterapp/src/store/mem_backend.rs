use super::backend::StorageBackend;
use super::{parse_records, render_records, Loaded};
use crate::error::{RosterError, Result};
use crate::model::User;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// Keeps the "file" as rendered text so loads go through the same line
/// parser as [`super::fs_backend::FsBackend`]. Uses a `Mutex` rather than
/// `RefCell` because the store is shared across server worker threads.
#[derive(Default)]
pub struct MemBackend {
    contents: Mutex<Option<String>>,
    flushes: AtomicUsize,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing data "file".
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    /// Current durable text, `None` if nothing was ever written.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }

    /// Number of successful flushes so far.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Loaded> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| RosterError::Store("memory backend lock poisoned".to_string()))?;
        Ok(contents.as_deref().map(parse_records).unwrap_or_default())
    }

    fn flush(&self, users: &[User]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| RosterError::Store("memory backend lock poisoned".to_string()))?;
        *contents = Some(render_records(users));
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://users")
    }
}
