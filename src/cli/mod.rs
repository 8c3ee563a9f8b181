//! Command-line interface for agen
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::store::TaskStore;

mod init;
mod list;
mod mark;
mod new;
mod remove;

/// agen - a small local task tracker
///
/// Each task is stored as one binary record in the task directory, named by
/// its UUID. Commands accept any unique prefix of that UUID.
#[derive(Parser, Debug)]
#[command(name = "agen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task directory (defaults to $HOME/.agen/tasks)
    #[arg(long, global = true, env = "AGEN_TASKS_DIR")]
    pub tasks_dir: Option<PathBuf>,

    /// Config file (defaults to $HOME/.agen/config.toml)
    #[arg(long, global = true, env = "AGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the task directory
    Init,

    /// Create a task
    #[command(alias = "newTask")]
    New {
        /// Task title (1-255 bytes)
        title: String,

        /// Longer description (up to 65535 bytes)
        #[arg(long = "desc", default_value = "")]
        description: String,

        /// Mark the task as recurring
        #[arg(long)]
        periodic: bool,

        /// Priority: low, medium, high
        #[arg(long, default_value = "medium")]
        prio: String,

        /// Status: todo, doing, done
        #[arg(long, default_value = "todo")]
        status: String,
    },

    /// List tasks, optionally filtered by status and priority keywords
    List {
        /// Filter tokens (todo, doing, done, low, medium, high)
        filters: Vec<String>,
    },

    /// Set the status or priority of tasks
    Mark {
        /// Status or priority keyword
        mark: String,

        /// Task ids or unique prefixes
        ids: Vec<String>,
    },

    /// Delete tasks
    #[command(alias = "rm")]
    Remove {
        /// Task ids or unique prefixes
        ids: Vec<String>,
    },
}

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub tasks_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub output: OutputOptions,
}

impl GlobalOptions {
    /// Load the config file. An explicit `--config` must parse; the default
    /// location falls back to defaults.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Ok(Config::load_or_default(&config::config_path(None)?)),
        }
    }

    pub fn resolve_tasks_dir(&self, config: &Config) -> Result<PathBuf> {
        config::resolve_tasks_dir(self.tasks_dir.as_deref(), config)
    }

    /// Open the store over an existing task directory.
    pub fn open_store(&self) -> Result<TaskStore> {
        let config = self.load_config()?;
        let dir = self.resolve_tasks_dir(&config)?;
        tracing::debug!(dir = %dir.display(), "opening task store");
        ensure_tasks_dir(&dir)?;
        TaskStore::open(dir, config.store.options())
    }
}

fn ensure_tasks_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::InvalidStorePath(dir.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(Error::InvalidStorePath(dir.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let global = GlobalOptions {
            tasks_dir: self.tasks_dir,
            config: self.config,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
        };

        match self.command {
            Commands::Init => init::run(&global),
            Commands::New {
                title,
                description,
                periodic,
                prio,
                status,
            } => new::run(
                &global,
                new::NewOptions {
                    title,
                    description,
                    periodic,
                    priority: prio,
                    status,
                },
            ),
            Commands::List { filters } => list::run(&global, list::ListOptions { filters }),
            Commands::Mark { mark, ids } => mark::run(&global, mark::MarkOptions { mark, ids }),
            Commands::Remove { ids } => remove::run(&global, remove::RemoveOptions { ids }),
        }
    }
}
