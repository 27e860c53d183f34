use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::user_store::UserStore;

pub fn run<B: StorageBackend>(store: &mut UserStore<B>, id: u64) -> Result<CmdResult> {
    let user = store.remove(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "User deleted ({}): {}",
        user.id, user.name
    )));
    Ok(result.with_affected_users(vec![user]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, get};
    use crate::error::RosterError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn removes_user() {
        let mut store = UserStore::with_backend(MemBackend::new());
        create::run(&mut store, "Ann", None).unwrap();
        let result = run(&mut store, 1).unwrap();
        assert_eq!(result.affected_users[0].name, "Ann");
        assert!(get::run(&store, 1).is_err());
        assert_eq!(store.backend().contents().unwrap(), "");
    }

    #[test]
    fn deleting_missing_id_changes_nothing() {
        let mut store = UserStore::with_backend(MemBackend::new());
        create::run(&mut store, "Ann", None).unwrap();
        let contents = store.backend().contents();

        assert!(matches!(
            run(&mut store, 2).unwrap_err(),
            RosterError::UserNotFound(2)
        ));
        assert_eq!(store.backend().flush_count(), 1);
        assert_eq!(store.backend().contents(), contents);
    }

    #[test]
    fn freed_id_is_not_reissued() {
        let mut store = UserStore::with_backend(MemBackend::new());
        create::run(&mut store, "Ann", None).unwrap();
        run(&mut store, 1).unwrap();
        let bob = create::run(&mut store, "Bob", None).unwrap();
        assert_eq!(bob.affected_users[0].id, 2);
    }
}
