//! Profile store behavior through the public API, including interop with a
//! hand-edited backing file.

use orbit::error::ApiError;
use orbit::profile::ProfileStore;
use orbit::types::Profile;
use tempfile::TempDir;

fn profile(name: &str, port: u16) -> Profile {
    Profile {
        name: name.to_string(),
        url: "server.example.com".to_string(),
        port,
        api_key: format!("key-{}", name),
        is_default: false,
    }
}

#[test]
fn store_round_trips_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let writer = ProfileStore::new(path.clone());
    writer.add(profile("dev", 3986)).unwrap();
    writer.add(profile("staging", 4000)).unwrap();

    // A fresh instance over the same file sees the same collection.
    let reader = ProfileStore::new(path);
    let profiles = reader.list().unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "dev");
    assert!(profiles[0].is_default);
    assert_eq!(profiles[1].port, 4000);
    assert!(!profiles[1].is_default);
}

#[test]
fn hand_edited_file_is_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"[
  {
    "name": "edited",
    "url": "10.0.0.5",
    "port": 3986,
    "apiKey": "pasted-key",
    "isDefault": true
  }
]"#,
    )
    .unwrap();

    let store = ProfileStore::new(path);
    let default = store.get_default().unwrap().unwrap();
    assert_eq!(default.name, "edited");
    assert_eq!(default.api_key, "pasted-key");
}

#[test]
fn hand_edited_file_may_omit_is_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"[{"name": "bare", "url": "localhost", "port": 3986, "apiKey": "k"}]"#,
    )
    .unwrap();

    let store = ProfileStore::new(path);
    let profiles = store.list().unwrap();
    assert!(!profiles[0].is_default);
    assert!(store.get_default().unwrap().is_none());
}

#[test]
fn corrupt_file_is_a_storage_error_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = ProfileStore::new(path);
    assert!(matches!(store.list(), Err(ApiError::Storage(_))));
}

#[test]
fn deleting_the_default_does_not_promote_another() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path().join("config.json"));
    store.add(profile("a", 3986)).unwrap();
    store.add(profile("b", 3986)).unwrap();
    store.delete_by_name("a").unwrap();

    let profiles = store.list().unwrap();
    assert_eq!(profiles.len(), 1);
    assert!(store.get_default().unwrap().is_none());
}

#[test]
fn lookups_are_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let store = ProfileStore::new(dir.path().join("config.json"));
    store.add(profile("Dev Server", 3986)).unwrap();

    assert!(store.name_exists("DEV SERVER").unwrap());
    assert_eq!(
        store.get_by_name("dev server").unwrap().unwrap().name,
        "Dev Server"
    );
}
