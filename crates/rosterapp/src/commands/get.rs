use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;

pub fn run<B: StorageBackend>(store: &UserStore<B>, id: u64) -> Result<CmdResult> {
    let user = store.get(id)?;
    Ok(CmdResult::default().with_listed_users(vec![user]))
}
