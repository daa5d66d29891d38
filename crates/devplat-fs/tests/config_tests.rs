use devplat_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Descriptor {
    name: String,
    platform: BTreeMap<String, String>,
}

fn sample() -> Descriptor {
    let mut platform = BTreeMap::new();
    platform.insert("type".to_string(), "devcenter".to_string());
    Descriptor {
        name: "todo-app".into(),
        platform,
    }
}

#[rstest]
#[case("config.json", r#"{"name": "todo-app", "platform": {"type": "devcenter"}}"#)]
#[case("devplat.yaml", "name: todo-app\nplatform:\n  type: devcenter\n")]
#[case("config.toml", "name = \"todo-app\"\n[platform]\ntype = \"devcenter\"\n")]
fn test_load_each_format(#[case] file: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(file);
    fs::write(&path, content).unwrap();

    let loaded: Descriptor = ConfigStore::new().load(&path).unwrap();
    assert_eq!(loaded, sample());
}

#[rstest]
#[case("config.json")]
#[case("devplat.yaml")]
#[case("config.toml")]
fn test_save_then_load(#[case] file: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(file);
    let store = ConfigStore::new();

    store.save(&path, &sample()).unwrap();
    let loaded: Descriptor = store.load(&path).unwrap();

    assert_eq!(loaded, sample());
}

#[test]
fn test_load_optional_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let loaded: Option<Descriptor> = ConfigStore::new()
        .load_optional(&temp.path().join("config.json"))
        .unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_optional_malformed_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let result: devplat_fs::Result<Option<Descriptor>> = ConfigStore::new().load_optional(&path);
    match result {
        Err(Error::ConfigParse { format, path: p, .. }) => {
            assert_eq!(format, "JSON");
            assert_eq!(p, path);
        }
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_unsupported_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.xyz");
    fs::write(&path, "data").unwrap();

    let result: devplat_fs::Result<Descriptor> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}
