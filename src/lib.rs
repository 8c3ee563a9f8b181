//! agen - local task tracking library
//!
//! Tasks are persisted one per file in a task directory, encoded with a
//! small length-prefixed binary layout and named by their UUID.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `codec`: Binary record encoding and decoding
//! - `config`: Configuration loading from `~/.agen/config.toml`
//! - `error`: Error types and result aliases
//! - `filter`: Status / priority filtering
//! - `lock`: File locking and atomic writes for the store
//! - `output`: Human and JSON output envelopes
//! - `resolver`: Identifier prefix resolution
//! - `store`: Directory-backed task table
//! - `task`: The task entity and its enums

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod lock;
pub mod output;
pub mod resolver;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use filter::{filter_tasks, TaskFilter};
pub use resolver::{Resolution, Resolver};
pub use store::{StoreOptions, TaskStore, WriteMode};
pub use task::{Priority, Status, Task};
