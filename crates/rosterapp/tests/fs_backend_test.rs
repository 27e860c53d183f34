use rosterapp::api::RosterApi;
use rosterapp::model::{User, UserPatch};
use rosterapp::store::backend::StorageBackend;
use rosterapp::store::fs_backend::FsBackend;
use rosterapp::store::user_store::UserStore;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, FsBackend) {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("nested").join("users.txt");
    let backend = FsBackend::new(data_file.clone());
    (dir, data_file, backend)
}

#[test]
fn test_load_missing_file_prepares_directory() {
    let (dir, data_file, backend) = setup();

    let loaded = backend.load().unwrap();
    assert!(loaded.users.is_empty());
    assert!(loaded.malformed.is_empty());

    // Directory is ready, file is only created on first flush
    assert!(dir.path().join("nested").is_dir());
    assert!(!data_file.exists());
}

#[test]
fn test_flush_writes_line_format() {
    let (_dir, data_file, backend) = setup();
    let users = vec![User::new(1, "Ann", "ann@x.com"), User::new(2, "Bob", "")];

    backend.flush(&users).unwrap();

    let on_disk = fs::read_to_string(&data_file).unwrap();
    assert_eq!(on_disk, "1||Ann||ann@x.com\n2||Bob||\n");
}

#[test]
fn test_flush_overwrites_previous_content() {
    let (_dir, data_file, backend) = setup();
    backend
        .flush(&[User::new(1, "Ann", ""), User::new(2, "Bob", "")])
        .unwrap();
    backend.flush(&[User::new(2, "Bob", "b@y")]).unwrap();

    assert_eq!(fs::read_to_string(&data_file).unwrap(), "2||Bob||b@y\n");
}

#[test]
fn test_flush_leaves_no_tmp_files() {
    let (dir, _data_file, backend) = setup();
    backend.flush(&[User::new(1, "Atomic", "")]).unwrap();

    let entries = fs::read_dir(dir.path().join("nested")).unwrap();
    for entry in entries {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_failed_flush_removes_tmp_file() {
    let (dir, data_file, backend) = setup();
    // A directory where the data file should be makes the final rename fail
    fs::create_dir_all(&data_file).unwrap();

    let err = backend.flush(&[User::new(1, "Ann", "")]).unwrap_err();
    assert!(matches!(err, rosterapp::error::RosterError::Io(_)));

    let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "Found leftover tmp files: {:?}", leftovers);
}

#[test]
fn test_flush_then_load_round_trip() {
    let (_dir, _data_file, backend) = setup();
    let users = vec![
        User::new(1, "Ann", "ann@x.com"),
        User::new(4, "Zoë Ünicode", "z@x"),
        User::new(9, "Name with spaces", ""),
    ];
    backend.flush(&users).unwrap();

    let loaded = backend.load().unwrap();
    assert_eq!(loaded.users, users);
    assert!(loaded.malformed.is_empty());
}

#[test]
fn test_load_skips_two_field_line() {
    let (_dir, data_file, backend) = setup();
    fs::create_dir_all(data_file.parent().unwrap()).unwrap();
    fs::write(&data_file, "1||Ann||a@x\n2||Bob\n").unwrap();

    let (store, malformed) = UserStore::open(backend).unwrap();
    assert_eq!(store.list(), vec![User::new(1, "Ann", "a@x")]);
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].content, "2||Bob");
}

#[test]
fn test_flush_failure_is_reported_and_memory_leads_disk() {
    let (dir, data_file, backend) = setup();
    let (api, _) = RosterApi::open(backend).unwrap();
    api.create_user("Ann", None).unwrap();

    // Replace the data directory with a plain file so the next write fails
    fs::remove_dir_all(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested"), "not a directory").unwrap();

    let err = api.create_user("Bob", None).unwrap_err();
    assert!(matches!(err, rosterapp::error::RosterError::Io(_)));
    assert_eq!(api.user_count().unwrap(), 2);
    assert!(!data_file.exists());
}

#[test]
fn test_restart_sees_every_mutation() {
    let (_dir, data_file, backend) = setup();
    {
        let (api, _) = RosterApi::open(backend).unwrap();
        api.create_user("Ann", Some("a@x")).unwrap();
        api.create_user("Bob", None).unwrap();
        api.create_user("Cid", None).unwrap();
        let patch = UserPatch {
            name: Some("Robert".into()),
            ..Default::default()
        };
        api.update_user(2, &patch).unwrap();
        api.delete_user(1).unwrap();
    }

    let (api, report) = RosterApi::open(FsBackend::new(data_file)).unwrap();
    assert!(report.messages.is_empty());
    let users = api.list_users().unwrap().listed_users;
    assert_eq!(
        users,
        vec![User::new(2, "Robert", ""), User::new(3, "Cid", "")]
    );
    assert_eq!(api.create_user("Dee", None).unwrap().affected_users[0].id, 4);
}
