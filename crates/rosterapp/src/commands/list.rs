use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;

pub fn run<B: StorageBackend>(store: &UserStore<B>) -> Result<CmdResult> {
    let users = store.list();
    let mut result = CmdResult::default();
    if users.is_empty() {
        result.add_message(CmdMessage::info("No users found."));
    }
    Ok(result.with_listed_users(users))
}
