use super::Loaded;
use crate::error::Result;
use crate::model::User;
use std::path::PathBuf;

/// Abstract interface for the durable side of the store.
///
/// Backends hold no record state of their own: `load` reads whatever is
/// durable, `flush` replaces it with the snapshot it is given. `UserStore`
/// decides when each happens.
pub trait StorageBackend: Send {
    /// Read the durable record set.
    /// A missing data file is not an error: it yields an empty `Loaded` and
    /// prepares the location for a later flush.
    fn load(&self) -> Result<Loaded>;

    /// Replace the durable record set with `users`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn flush(&self, users: &[User]) -> Result<()>;

    /// Where the records live. For FsBackend the real path, for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
