#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use agen::codec;
use agen::task::{Task, ID_LEN};
use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch `$HOME` with a task directory under it.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    /// Like `new`, with the task directory already created.
    pub fn initialized() -> Self {
        let home = Self::new();
        fs::create_dir_all(home.tasks_dir()).expect("create tasks dir");
        home
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.dir.path().join("tasks")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(".agen").join("config.toml")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Store `task` under a chosen identifier, e.g. to force a shared prefix.
    pub fn write_record(&self, task: &Task, id: &str) -> std::io::Result<PathBuf> {
        assert_eq!(id.len(), ID_LEN, "identifier must be {ID_LEN} chars");
        let mut bytes = codec::encode(task);
        let len = bytes.len();
        bytes[len - ID_LEN..].copy_from_slice(id.as_bytes());
        let path = self.tasks_dir().join(id);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    pub fn record_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.tasks_dir())
            .expect("read tasks dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// `agen` with `$HOME` and the task directory pointed into this tempdir.
    pub fn cmd(&self) -> Command {
        let mut cmd = agen_cmd();
        cmd.env("HOME", self.path());
        cmd.env("AGEN_TASKS_DIR", self.tasks_dir());
        cmd
    }
}

pub fn agen_cmd() -> Command {
    let mut cmd = Command::cargo_bin("agen").expect("binary");
    cmd.env_remove("AGEN_TASKS_DIR");
    cmd.env_remove("AGEN_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}
