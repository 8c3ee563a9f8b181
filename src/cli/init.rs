//! agen init command implementation
//!
//! Creates the task directory (and its parents) if it does not exist yet.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOptions;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};

#[derive(serde::Serialize)]
struct InitReport {
    tasks_dir: PathBuf,
    created: bool,
}

pub fn run(global: &GlobalOptions) -> Result<()> {
    let config = global.load_config()?;
    let dir = global.resolve_tasks_dir(&config)?;
    let created = ensure_dir(&dir)?;

    let report = InitReport {
        tasks_dir: dir.clone(),
        created,
    };

    let header = if created {
        "agen init: created task directory"
    } else {
        "agen init: nothing to do"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("tasks_dir", dir.display().to_string());
    human.push_next_step("agen new <title>");

    emit_success(global.output, "init", &report, Some(&human))
}

fn ensure_dir(path: &Path) -> Result<bool> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidStorePath(path.to_path_buf()));
    }
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::InvalidStorePath(path.to_path_buf()));
        }
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    tracing::debug!(dir = %path.display(), "created task directory");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_reports_creation() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("a/b/tasks");

        assert!(ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
        assert!(!ensure_dir(&dir).unwrap());
    }

    #[test]
    fn ensure_dir_rejects_files() {
        let root = tempfile::tempdir().expect("tempdir");
        let file = root.path().join("tasks");
        fs::write(&file, b"").unwrap();

        assert!(matches!(ensure_dir(&file), Err(Error::InvalidStorePath(_))));
    }
}
