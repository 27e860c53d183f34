use serde::{Deserialize, Serialize};

/// Separator between fields of a persisted record line.
///
/// Field values are written verbatim, so a name or email containing this
/// sequence will not survive a flush/load round-trip.
pub const FIELD_SEPARATOR: &str = "||";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Formats the record as `id||name||email`, without a line terminator.
    pub fn to_record_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.id,
            self.name,
            self.email,
            sep = FIELD_SEPARATOR
        )
    }
}

/// Parses one persisted line back into a [`User`].
///
/// The line is trimmed first and must split into exactly three fields with a
/// positive integer id. On failure the reason is returned as text.
pub fn parse_record_line(line: &str) -> std::result::Result<User, String> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    if fields.len() != 3 {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    }

    let id: u64 = fields[0]
        .trim()
        .parse()
        .map_err(|_| format!("invalid id: {:?}", fields[0]))?;
    if id == 0 {
        return Err("id must be positive".to_string());
    }

    Ok(User::new(id, fields[1], fields[2]))
}

/// Fields a client may change on an existing user. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
