//! agen remove command implementation

use std::collections::HashSet;

use crate::cli::GlobalOptions;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

/// Options for the remove command
pub struct RemoveOptions {
    pub ids: Vec<String>,
}

#[derive(serde::Serialize)]
struct RemoveReport {
    removed: Vec<String>,
}

pub fn run(global: &GlobalOptions, options: RemoveOptions) -> Result<()> {
    let store = global.open_store()?;

    // Resolve everything up front; one unknown or ambiguous id deletes nothing.
    let mut ids = options
        .ids
        .iter()
        .map(|id| store.resolve_id(id))
        .collect::<Result<Vec<_>>>()?;
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));

    let mut removed = Vec::with_capacity(ids.len());
    for id in &ids {
        removed.push(store.remove(id)?);
    }

    let mut human = HumanOutput::new(format!("agen remove: {} task(s) removed", removed.len()));
    for id in &removed {
        human.push_line(format!("- {id}"));
    }

    emit_success(
        global.output,
        "remove",
        &RemoveReport { removed },
        Some(&human),
    )
}
