//! agen mark command implementation
//!
//! Sets the status or priority of one or more tasks. Every id is resolved
//! before the first task is touched, so a bad id leaves all tasks unchanged.

use std::str::FromStr;

use crate::cli::GlobalOptions;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{Priority, Status, Task};

/// Options for the mark command
pub struct MarkOptions {
    pub mark: String,
    pub ids: Vec<String>,
}

/// A status or priority keyword given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Status(Status),
    Priority(Priority),
}

impl Mark {
    fn apply(self, task: &mut Task) -> Result<()> {
        match self {
            Mark::Status(status) => task.set_status(status.as_byte()),
            Mark::Priority(priority) => task.set_priority(priority.as_byte()),
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Mark::Status(status) => status.keyword(),
            Mark::Priority(priority) => priority.keyword(),
        }
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(status) = Status::from_keyword(s) {
            return Ok(Mark::Status(status));
        }
        if let Some(priority) = Priority::from_keyword(s) {
            return Ok(Mark::Priority(priority));
        }
        Err(Error::InvalidArgument(format!(
            "unknown mark '{s}': expected todo, doing, done, low, medium or high"
        )))
    }
}

#[derive(serde::Serialize)]
struct MarkReport {
    mark: &'static str,
    updated: Vec<Task>,
}

pub fn run(global: &GlobalOptions, options: MarkOptions) -> Result<()> {
    let mark: Mark = options.mark.parse()?;
    let store = global.open_store()?;

    let ids = options
        .ids
        .iter()
        .map(|id| store.resolve_id(id))
        .collect::<Result<Vec<_>>>()?;

    let mut updated = Vec::with_capacity(ids.len());
    for id in &ids {
        updated.push(store.update(id, |task| mark.apply(task))?);
    }
    tracing::debug!(mark = mark.keyword(), count = updated.len(), "marked tasks");

    let mut human = HumanOutput::new(format!(
        "agen mark: {} task(s) marked {}",
        updated.len(),
        mark.keyword()
    ));
    for task in &updated {
        human.push_line(format!("> {task}"));
    }

    let report = MarkReport {
        mark: mark.keyword(),
        updated,
    };
    emit_success(global.output, "mark", &report, Some(&human))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marks() {
        assert_eq!("done".parse::<Mark>().unwrap(), Mark::Status(Status::Done));
        assert_eq!("high".parse::<Mark>().unwrap(), Mark::Priority(Priority::High));
        // same rule as list filter tokens: exact lowercase keywords
        assert!("High".parse::<Mark>().is_err());
        assert!(matches!(
            "urgent".parse::<Mark>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn applies_to_the_right_field() {
        let mut task = Task::new_default("t").unwrap();
        Mark::Status(Status::Doing).apply(&mut task).unwrap();
        Mark::Priority(Priority::Low).apply(&mut task).unwrap();

        assert_eq!(task.status(), Status::Doing);
        assert_eq!(task.priority(), Priority::Low);
    }
}
