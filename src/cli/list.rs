//! agen list command implementation
//!
//! Prints one `> <summary>` line per task, in directory order.

use crate::cli::GlobalOptions;
use crate::error::Result;
use crate::filter::TaskFilter;
use crate::output::emit_success;
use crate::task::Task;

/// Options for the list command
pub struct ListOptions {
    pub filters: Vec<String>,
}

pub fn run(global: &GlobalOptions, options: ListOptions) -> Result<()> {
    let store = global.open_store()?;
    let filter = TaskFilter::from_tokens(&options.filters);
    let tasks = filter.apply(store.load_all()?);
    tracing::debug!(count = tasks.len(), filtered = !filter.is_empty(), "listing tasks");

    if global.output.json {
        return emit_success(global.output, "list", &tasks, None);
    }

    for line in summary_lines(&tasks) {
        println!("{line}");
    }
    Ok(())
}

fn summary_lines(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| format!("> {task}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_task() {
        let tasks = vec![
            Task::new_default("first").unwrap(),
            Task::new("second", "", false, 2, 5).unwrap(),
        ];
        let lines = summary_lines(&tasks);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("> [To do] first <medium> "));
        assert!(lines[1].starts_with("> [Done] second <high> "));
        assert!(lines[1].ends_with(tasks[1].identifier()));
    }
}
