use crate::commands::{normalize_name, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;

pub fn run<B: StorageBackend>(
    store: &mut UserStore<B>,
    name: &str,
    email: Option<&str>,
) -> Result<CmdResult> {
    // Validate before touching the allocator so a rejected create burns no id.
    let name = normalize_name(name)?;
    let email = email.map(str::trim).unwrap_or_default().to_string();

    let user = store.insert(name, email)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "User created ({}): {}",
        user.id, user.name
    )));
    result.affected_users.push(user);
    Ok(result)
}
