use std::fs;
use std::path::PathBuf;

use agen::config::{resolve_tasks_dir, Config};
use agen::{StoreOptions, WriteMode};

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_or_default(&dir.path().join("nope.toml"));

    assert_eq!(config.store.options(), StoreOptions::default());
    assert_eq!(config.store.lock_timeout_ms, 5000);
}

#[test]
fn partial_store_table_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "[store]\nlock = true\n")?;

    let config = Config::load(&path)?;
    assert_eq!(config.store.write_mode, WriteMode::InPlace);
    assert_eq!(config.store.options().lock_timeout_ms, Some(5000));
    Ok(())
}

#[test]
fn unknown_write_mode_is_an_error_when_explicit() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "tasks_dir = \"/x\"\n[store]\nwrite_mode = \"fast\"\n")?;

    assert!(Config::load(&path).is_err());
    assert!(Config::load_or_default(&path).tasks_dir.is_none());
    Ok(())
}

#[test]
fn cli_dir_beats_config() -> Result<(), Box<dyn std::error::Error>> {
    let config: Config = toml::from_str("tasks_dir = \"/from/config\"")?;

    assert_eq!(
        resolve_tasks_dir(Some(PathBuf::from("/cli").as_path()), &config)?,
        PathBuf::from("/cli")
    );
    assert_eq!(
        resolve_tasks_dir(None, &config)?,
        PathBuf::from("/from/config")
    );
    Ok(())
}
