// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AppSettings, Registry, RepoEntry, SettingsStore};

fn registry_in(dir: &tempfile::TempDir) -> Registry {
    Registry::new(dir.path().join("conf").join("repos.json"))
}

#[test]
fn test_entry_names_from_last_segment() {
    let names: Vec<String> = ["/src/app", "/src/app/", "relative/lib", "solo"]
        .iter()
        .map(|p| RepoEntry::from_path(p).name)
        .collect();
    assert_eq!(names, ["app", "/src/app/", "lib", "solo"]);
}

#[test]
fn test_registry_add_list_remove() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_in(&dir);
    assert!(registry.list().is_empty());

    assert!(registry.add("/tmp/a").unwrap());
    assert!(registry.add("/tmp/b").unwrap());
    assert!(!registry.add("/tmp/a").unwrap());
    assert_eq!(
        registry.list(),
        [RepoEntry::from_path("/tmp/a"), RepoEntry::from_path("/tmp/b")]
    );

    insta::assert_snapshot!(std::fs::read_to_string(registry.path()).unwrap(), @r#"
    [
      {
        "path": "/tmp/a"
      },
      {
        "path": "/tmp/b"
      }
    ]
    "#);

    assert!(registry.remove("/tmp/a").unwrap());
    assert!(!registry.remove("/tmp/zzz").unwrap());
    assert_eq!(registry.list(), [RepoEntry::from_path("/tmp/b")]);
}

#[test]
fn test_registry_explicit_name_wins() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_in(&dir);
    std::fs::create_dir_all(registry.path().parent().unwrap()).unwrap();
    std::fs::write(
        registry.path(),
        r#"[{"path":"/w/app","name":"Frontend"},{"path":"/w/api"}]"#,
    )
    .unwrap();

    let names: Vec<String> = registry.list().into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["Frontend", "api"]);
}

#[test]
fn test_registry_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_in(&dir);
    std::fs::create_dir_all(registry.path().parent().unwrap()).unwrap();
    std::fs::write(registry.path(), "{oops").unwrap();

    assert!(registry.list().is_empty());
    assert!(!registry.remove("/tmp/a").unwrap());
    assert_eq!(std::fs::read_to_string(registry.path()).unwrap(), "{oops");

    assert!(registry.add("/tmp/a").unwrap());
    assert_eq!(registry.list(), [RepoEntry::from_path("/tmp/a")]);
}

#[test]
fn test_registry_remove_on_missing_file_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry_in(&dir);
    assert!(!registry.remove("/tmp/a").unwrap());
    assert!(!registry.path().exists());
}

#[test]
fn test_registry_set_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = registry_in(&dir);
    registry.add("/tmp/a").unwrap();

    registry.set_path(dir.path().join("other.json"));
    assert!(registry.list().is_empty());
}

#[test]
fn test_settings_api_key_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join(".multi").join("settings.json"));
    assert_eq!(store.get(), AppSettings::default());

    store.set_api_key("  sk-test  ").unwrap();
    assert_eq!(store.get().api_key(), Some("sk-test"));

    store.set_api_key("   ").unwrap();
    let settings = store.get();
    assert_eq!(settings.open_ai_api_key.as_deref(), Some(""));
    assert_eq!(settings.api_key(), None);
}

#[test]
fn test_settings_keep_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let store = SettingsStore::new(path.clone());
    store.set_api_key("k").unwrap();

    insta::assert_snapshot!(std::fs::read_to_string(&path).unwrap(), @r#"
    {
      "openAIApiKey": "k",
      "theme": "dark"
    }
    "#);
}
