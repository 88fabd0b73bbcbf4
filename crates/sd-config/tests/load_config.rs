use sd_config::{Config, ConfigError};
use sd_core::EntityType;

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(p) if p == path));
}

#[test]
fn test_load_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_load_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
  "patterns": { "test_pattern": "TEST-\\d{3}" },
  "roles": {
    "test_role": {
      "allowed_entities": ["email"],
      "can_restore": true,
      "description": "Test role"
    }
  }
}"#,
    )
    .unwrap();

    let resolved = Config::load(&path).unwrap().resolve();
    let test_pattern = EntityType::new("test_pattern").unwrap();
    assert!(resolved.patterns.contains(&test_pattern));
    assert!(resolved.roles.list_roles().contains(&"test_role"));
}

#[test]
fn test_sample_round_trips_through_both_formats() {
    let dir = tempfile::tempdir().unwrap();

    for name in ["sample.json", "sample.toml"] {
        let path = dir.path().join(name);
        Config::sample().save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, Config::sample(), "mismatch for {name}");
    }
}
