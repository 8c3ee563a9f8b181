//! agen new command implementation

use crate::cli::GlobalOptions;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::task::{Priority, Status, Task};

/// Options for the new command
pub struct NewOptions {
    pub title: String,
    pub description: String,
    pub periodic: bool,
    pub priority: String,
    pub status: String,
}

pub fn run(global: &GlobalOptions, options: NewOptions) -> Result<()> {
    let priority: Priority = options.priority.parse()?;
    let status: Status = options.status.parse()?;

    // Validate before touching the filesystem.
    let task = Task::new(
        options.title,
        options.description,
        options.periodic,
        priority.as_byte(),
        status.as_byte(),
    )?;

    let store = global.open_store()?;
    store.save(&task)?;

    let mut human = HumanOutput::new("agen new: created task");
    human.push_summary("id", task.identifier());
    human.push_line(format!("> {task}"));

    emit_success(global.output, "new", &task, Some(&human))
}
