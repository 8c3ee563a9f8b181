//! Configuration loading and task directory discovery
//!
//! Handles parsing of `~/.agen/config.toml`.
//!
//! Task directory resolution order:
//! 1) CLI --tasks-dir / AGEN_TASKS_DIR
//! 2) `tasks_dir` from the config file
//! 3) `$HOME/.agen/tasks`

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;
use crate::store::{StoreOptions, WriteMode};

/// Directory under `$HOME` holding config and tasks
pub const APP_DIR: &str = ".agen";
pub const CONFIG_FILE: &str = "config.toml";
pub const TASKS_DIR: &str = "tasks";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task directory override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_dir: Option<PathBuf>,

    /// Store write behavior
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `in_place` or `atomic`
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Take `<tasks dir>.lock` around mutations
    #[serde(default)]
    pub lock: bool,

    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::default(),
            lock: false,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            write_mode: self.write_mode,
            lock_timeout_ms: self.lock.then_some(self.lock_timeout_ms),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration if present, or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.tasks_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "tasks_dir cannot be empty".to_string(),
                ));
            }
        }
        if self.store.lock && self.store.lock_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "store.lock_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// `$HOME/.agen`
pub fn app_dir() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or_else(|| {
        Error::InvalidConfig("cannot determine home directory".to_string())
    })?;
    Ok(dirs.home_dir().join(APP_DIR))
}

/// Config file path: explicit path, or `$HOME/.agen/config.toml`.
pub fn config_path(cli_config: Option<&Path>) -> Result<PathBuf> {
    match cli_config {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(app_dir()?.join(CONFIG_FILE)),
    }
}

/// Pick the task directory from CLI, config, then the home default.
pub fn resolve_tasks_dir(cli_dir: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = cli_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = &config.tasks_dir {
        return Ok(dir.clone());
    }
    Ok(app_dir()?.join(TASKS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_or_default(&dir.path().join(CONFIG_FILE));

        assert!(config.tasks_dir.is_none());
        assert_eq!(config.store.write_mode, WriteMode::InPlace);
        assert!(!config.store.lock);
        assert_eq!(config.store.options(), StoreOptions::default());
    }

    #[test]
    fn store_options_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
tasks_dir = "/srv/tasks"

[store]
write_mode = "atomic"
lock = true
lock_timeout_ms = 250
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.tasks_dir, Some(PathBuf::from("/srv/tasks")));
        assert_eq!(
            config.store.options(),
            StoreOptions {
                write_mode: WriteMode::Atomic,
                lock_timeout_ms: Some(250),
            }
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);

        fs::write(&path, "[store]\nwrite_mode = \"sometimes\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
        assert_eq!(
            Config::load_or_default(&path).store.write_mode,
            WriteMode::InPlace
        );

        fs::write(&path, "[store]\nlock = true\nlock_timeout_ms = 0\n").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn tasks_dir_precedence() {
        let config = Config {
            tasks_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };

        assert_eq!(
            resolve_tasks_dir(Some(Path::new("/from/cli")), &config).unwrap(),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            resolve_tasks_dir(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
        assert_eq!(
            resolve_tasks_dir(Some(Path::new("")), &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }
}
