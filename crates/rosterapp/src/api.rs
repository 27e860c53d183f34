//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every roster operation.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the matching command function
//! - **Serializes access**: the store sits behind one `Mutex`, and each call holds it
//!   for the whole read, mutate and flush sequence. Two concurrent creates therefore
//!   can never allocate the same id, and a flush never sees a half-applied mutation.
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `RosterApi<FsBackend>`
//! - Testing: `RosterApi<MemBackend>`
//!
//! Calls block on file I/O while holding the lock. Async callers should run them on a
//! blocking thread.

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{RosterError, Result};
use crate::model::UserPatch;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;
use std::sync::Mutex;

pub use crate::commands::MessageLevel;

pub struct RosterApi<B: StorageBackend> {
    store: Mutex<UserStore<B>>,
}

impl<B: StorageBackend> RosterApi<B> {
    pub fn new(store: UserStore<B>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Loads durable state and wraps it. Skipped lines come back as warnings.
    pub fn open(backend: B) -> Result<(Self, CmdResult)> {
        let (store, malformed) = UserStore::open(backend)?;
        let mut report = CmdResult::default();
        for record in malformed {
            report.add_message(CmdMessage::warning(format!(
                "Skipped malformed record on line {} ({}): {:?}",
                record.line, record.reason, record.content
            )));
        }
        Ok((Self::new(store), report))
    }

    fn with_store<T>(&self, op: impl FnOnce(&mut UserStore<B>) -> Result<T>) -> Result<T> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| RosterError::Store("user store lock poisoned".to_string()))?;
        op(&mut store)
    }

    pub fn list_users(&self) -> Result<CmdResult> {
        self.with_store(|store| commands::list::run(store))
    }

    pub fn get_user(&self, id: u64) -> Result<CmdResult> {
        self.with_store(|store| commands::get::run(store, id))
    }

    pub fn create_user(&self, name: &str, email: Option<&str>) -> Result<CmdResult> {
        self.with_store(|store| commands::create::run(store, name, email))
    }

    pub fn update_user(&self, id: u64, patch: &UserPatch) -> Result<CmdResult> {
        self.with_store(|store| commands::update::run(store, id, patch))
    }

    pub fn delete_user(&self, id: u64) -> Result<CmdResult> {
        self.with_store(|store| commands::delete::run(store, id))
    }

    /// Number of records currently held in memory.
    pub fn user_count(&self) -> Result<usize> {
        self.with_store(|store| Ok(store.len()))
    }

    /// Run a closure against the backend, e.g. to inspect test doubles.
    pub fn with_backend<T>(&self, op: impl FnOnce(&B) -> T) -> Result<T> {
        self.with_store(|store| Ok(op(store.backend())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn dispatches_crud_calls() {
        let api = RosterApi::new(UserStore::with_backend(MemBackend::new()));
        let created = api.create_user("Ann", None).unwrap();
        assert_eq!(created.affected_users[0].id, 1);

        let patch = UserPatch {
            email: Some("ann@x.com".into()),
            ..Default::default()
        };
        api.update_user(1, &patch).unwrap();
        assert_eq!(
            api.get_user(1).unwrap().listed_users[0].email,
            "ann@x.com"
        );

        api.delete_user(1).unwrap();
        assert!(api.list_users().unwrap().listed_users.is_empty());
        assert_eq!(api.with_backend(|b| b.flush_count()).unwrap(), 3);
    }

    #[test]
    fn open_turns_malformed_lines_into_warnings() {
        let backend = MemBackend::with_contents("1||Ann||a@x\nbroken\n");
        let (api, report) = RosterApi::open(backend).unwrap();
        assert_eq!(api.user_count().unwrap(), 1);
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].level, MessageLevel::Warning);
        assert!(report.messages[0].content.contains("line 2"));
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        let api = Arc::new(RosterApi::new(UserStore::with_backend(MemBackend::new())));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let api = Arc::clone(&api);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| {
                            api.create_user(&format!("user-{t}-{i}"), None)
                                .unwrap()
                                .affected_users[0]
                                .id
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=200).collect::<Vec<u64>>());

        let durable = api.with_backend(|b| b.contents().unwrap()).unwrap();
        assert_eq!(durable.lines().count(), 200);
    }
}
