use super::backend::StorageBackend;
use super::MalformedRecord;
use crate::error::{RosterError, Result};
use crate::model::User;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// In-memory owner of all user records and the id allocator.
///
/// Every mutating call flushes the complete record set through the backend
/// before returning. A failed flush is reported but the in-memory change is
/// kept, so memory may lead disk until the next successful flush.
pub struct UserStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    users: BTreeMap<u64, User>,
    /// Highest id handed out (or loaded) during this process.
    high_water: u64,
}

impl<B: StorageBackend> UserStore<B> {
    /// An empty store that has not read from the backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            users: BTreeMap::new(),
            high_water: 0,
        }
    }

    /// Loads durable state into a new store.
    ///
    /// Malformed lines are skipped and handed back so the caller can report them.
    pub fn open(backend: B) -> Result<(Self, Vec<MalformedRecord>)> {
        let loaded = backend.load()?;
        let mut store = Self::with_backend(backend);
        for user in loaded.users {
            store.high_water = store.high_water.max(user.id);
            store.users.insert(user.id, user);
        }
        let location = store.backend.location();
        debug!(
            records = store.users.len(),
            skipped = loaded.malformed.len(),
            location = %location.display(),
            "user store loaded"
        );
        Ok((store, loaded.malformed))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All records in ascending id order, which is creation order.
    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Result<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(RosterError::UserNotFound(id))
    }

    /// The id the next insert will receive.
    ///
    /// Fails once `u64::MAX` has been handed out or loaded.
    pub fn next_id(&self) -> Result<u64> {
        let max_existing = self.users.keys().next_back().copied().unwrap_or(0);
        self.high_water
            .max(max_existing)
            .checked_add(1)
            .ok_or_else(|| RosterError::Store("user id space exhausted".to_string()))
    }

    /// Allocates an id, stores the record and flushes.
    ///
    /// Nothing is changed when no id is left to allocate.
    pub fn insert(&mut self, name: String, email: String) -> Result<User> {
        let id = self.next_id()?;
        self.high_water = id;
        let user = User::new(id, name, email);
        self.users.insert(id, user.clone());
        self.flush()?;
        Ok(user)
    }

    /// Overwrites an existing record and flushes.
    pub fn replace(&mut self, user: User) -> Result<User> {
        match self.users.get_mut(&user.id) {
            Some(slot) => *slot = user.clone(),
            None => return Err(RosterError::UserNotFound(user.id)),
        }
        self.flush()?;
        Ok(user)
    }

    /// Removes a record and flushes. A missing id does not touch the backend.
    pub fn remove(&mut self, id: u64) -> Result<User> {
        let user = self
            .users
            .remove(&id)
            .ok_or(RosterError::UserNotFound(id))?;
        self.flush()?;
        Ok(user)
    }

    /// Writes the full current record set to the backend.
    pub fn flush(&self) -> Result<()> {
        let snapshot = self.list();
        self.backend.flush(&snapshot).inspect_err(|err| {
            let location = self.backend.location();
            error!(
                location = %location.display(),
                error = %err,
                "flush failed; in-memory state is ahead of durable state"
            );
        })
    }
}
