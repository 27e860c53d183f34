use crate::commands::{normalize_name, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::UserPatch;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;

pub fn run<B: StorageBackend>(
    store: &mut UserStore<B>,
    id: u64,
    patch: &UserPatch,
) -> Result<CmdResult> {
    let mut user = store.get(id)?;

    if patch.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!(
            "Nothing to update ({}): {}",
            user.id, user.name
        )));
        return Ok(result.with_affected_users(vec![user]));
    }

    if let Some(name) = &patch.name {
        user.name = normalize_name(name)?;
    }
    if let Some(email) = &patch.email {
        user.email = email.trim().to_string();
    }

    let user = store.replace(user)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "User updated ({}): {}",
        user.id, user.name
    )));
    Ok(result.with_affected_users(vec![user]))
}
