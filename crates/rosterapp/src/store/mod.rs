//! # Storage Layer
//!
//! The [`user_store::UserStore`] owns every user record in memory together with the id
//! allocator. Each mutation rewrites the full record set through a [`backend::StorageBackend`].
//!
//! ## Storage Format
//!
//! One record per line, fields in fixed order joined by [`FIELD_SEPARATOR`]:
//!
//! ```text
//! 1||Ann||ann@example.com
//! 2||Bob||
//! ```
//!
//! No header, no escaping. The whole file is replaced on every flush; there is no
//! append log and no per-record diff.
//!
//! ## Load Policy
//!
//! - Missing file: empty store, the containing directory is created.
//! - Blank lines: ignored.
//! - Lines that do not parse (wrong field count, bad id): skipped and reported as
//!   [`MalformedRecord`]s so startup can continue.
//! - Duplicate ids: the later line wins.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production flat file, written atomically (tmp + rename).
//! - [`mem_backend::MemBackend`]: in-memory "file" for tests, with write-error simulation.
//!
//! [`FIELD_SEPARATOR`]: crate::model::FIELD_SEPARATOR

use crate::model::{parse_record_line, User};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod user_store;

/// A persisted line that could not be turned into a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number in the durable file.
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Result of reading the durable representation.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Records in file order.
    pub users: Vec<User>,
    pub malformed: Vec<MalformedRecord>,
}

/// Parses the full text of a data file.
pub fn parse_records(text: &str) -> Loaded {
    let mut loaded = Loaded::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record_line(line) {
            Ok(user) => loaded.users.push(user),
            Err(reason) => loaded.malformed.push(MalformedRecord {
                line: idx + 1,
                content: line.to_string(),
                reason,
            }),
        }
    }

    loaded
}

/// Renders records as the data file body, one newline-terminated line each.
pub fn render_records(users: &[User]) -> String {
    let mut out = String::new();
    for user in users {
        out.push_str(&user.to_record_line());
        out.push('\n');
    }
    out
}
