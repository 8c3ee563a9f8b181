//! Directory-backed task table.
//!
//! Every task lives in its own file named after its identifier:
//!
//! ```text
//! <tasks dir>/
//!   0f8e4c52-3b1d-4a8e-9c1f-7d2a5b6e8f90    # one encoded record (see `codec`)
//!   6a1b...                                 # ...
//! <tasks dir>.lock                          # only when locking is enabled
//! ```
//!
//! The store holds its directory explicitly, so several stores can coexist
//! in one process. By default it assumes a single writer: no lock is taken
//! and records are truncated and rewritten in place. `StoreOptions` turns on
//! atomic replacement and an advisory lock for mutations.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock};
use crate::resolver::Resolver;
use crate::task::{validate_identifier, Task, ID_LEN};

/// How records are written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate and rewrite the record file.
    #[default]
    InPlace,
    /// Write a temp file next to the task directory and rename it over the record.
    Atomic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub write_mode: WriteMode,
    /// Hold `<dir>.lock` around mutations, waiting at most this long.
    pub lock_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    dir: PathBuf,
    options: StoreOptions,
}

impl TaskStore {
    /// Create a store without touching the filesystem.
    pub fn new(dir: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            dir: dir.into(),
            options,
        }
    }

    /// Create a store over an existing directory.
    pub fn open(dir: impl Into<PathBuf>, options: StoreOptions) -> Result<Self> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(Error::InvalidStorePath(dir));
        }
        let metadata = fs::metadata(&dir)?;
        if !metadata.is_dir() {
            return Err(Error::InvalidStorePath(dir));
        }
        Ok(Self::new(dir, options))
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.dir)
    }

    /// Path of the record file for a full identifier.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    /// Write `task` to `<dir>/<identifier>`, replacing any previous record.
    pub fn save(&self, task: &Task) -> Result<()> {
        let _lock = self.lock()?;
        self.write_record(task)
    }

    /// Load one task by full identifier or unique prefix.
    pub fn load_one(&self, id_or_prefix: &str) -> Result<Task> {
        let id = self.resolve_id(id_or_prefix)?;
        self.read_record(&id)
    }

    /// Load every record in directory order.
    ///
    /// A single unreadable or malformed record fails the whole listing.
    pub fn load_all(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !fs::metadata(&path)?.is_file() {
                return Err(Error::InvalidStorePath(path));
            }
            let data = fs::read(&path)?;
            let task = codec::decode(&data).inspect_err(|err| {
                tracing::debug!(path = %path.display(), %err, "failed to decode record");
            })?;
            tasks.push(task);
        }
        tracing::debug!(dir = %self.dir.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// True if at least one record identifier starts with `prefix`.
    ///
    /// Does not report ambiguity; use [`Resolver::resolve`] for that.
    pub fn exists(&self, prefix: &str) -> Result<bool> {
        Ok(self.resolver().count_with_prefix(prefix)? > 0)
    }

    /// Delete the record addressed by a full identifier or unique prefix.
    ///
    /// Returns the identifier of the removed task.
    pub fn remove(&self, id_or_prefix: &str) -> Result<String> {
        let _lock = self.lock()?;
        let id = self.resolve_id(id_or_prefix)?;
        fs::remove_file(self.record_path(&id)).map_err(|err| not_found(err, &id))?;
        tracing::debug!(id = %id, "removed task");
        Ok(id)
    }

    /// Load, mutate and save one task addressed by identifier or unique prefix.
    ///
    /// Nothing is written if resolution or `mutate` fails.
    pub fn update<F>(&self, id_or_prefix: &str, mutate: F) -> Result<Task>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        let _lock = self.lock()?;
        let id = self.resolve_id(id_or_prefix)?;
        let mut task = self.read_record(&id)?;
        mutate(&mut task)?;
        self.write_record(&task)?;
        Ok(task)
    }

    /// Turn user input into a stored identifier.
    ///
    /// Full-length identifiers address their file directly; shorter input is
    /// treated as a prefix and must match exactly one record.
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<String> {
        validate_identifier(id_or_prefix)?;
        if id_or_prefix.len() == ID_LEN {
            if !self.record_path(id_or_prefix).exists() {
                return Err(Error::TaskNotFound(id_or_prefix.to_string()));
            }
            return Ok(id_or_prefix.to_string());
        }
        self.resolver().resolve_unique(id_or_prefix)
    }

    fn read_record(&self, id: &str) -> Result<Task> {
        let path = self.record_path(id);
        let mut file = File::open(&path).map_err(|err| not_found(err, id))?;
        if !file.metadata()?.is_file() {
            return Err(Error::InvalidStorePath(path));
        }
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        codec::decode(&data)
    }

    fn write_record(&self, task: &Task) -> Result<()> {
        let path = self.record_path(task.identifier());
        let data = codec::encode(task);
        match self.options.write_mode {
            WriteMode::InPlace => {
                let mut file = File::create(&path)?;
                file.write_all(&data)?;
            }
            WriteMode::Atomic => {
                lock::write_atomic(&path, &lock::staging_dir_for(&self.dir), &data)?
            }
        }
        tracing::debug!(id = task.identifier(), bytes = data.len(), "saved task");
        Ok(())
    }

    fn lock(&self) -> Result<Option<FileLock>> {
        match self.options.lock_timeout_ms {
            Some(timeout_ms) => Ok(Some(FileLock::acquire(
                lock::lock_path_for(&self.dir),
                timeout_ms,
            )?)),
            None => Ok(None),
        }
    }
}

fn not_found(err: std::io::Error, id: &str) -> Error {
    if err.kind() == ErrorKind::NotFound {
        Error::TaskNotFound(id.to_string())
    } else {
        Error::Io(err)
    }
}
