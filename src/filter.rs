//! Status / priority filtering for task listings.
//!
//! Tokens are sorted into a status set and a priority set. Within a set the
//! values are alternatives; across sets both must hold. Unknown tokens are
//! ignored.

use std::collections::BTreeSet;

use crate::task::{Priority, Status, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    statuses: BTreeSet<Status>,
    priorities: BTreeSet<Priority>,
}

impl TaskFilter {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if let Some(status) = Status::from_keyword(token) {
                filter.statuses.insert(status);
            } else if let Some(priority) = Priority::from_keyword(token) {
                filter.priorities.insert(priority);
            }
        }
        filter
    }

    pub fn statuses(&self) -> impl Iterator<Item = Status> + '_ {
        self.statuses.iter().copied()
    }

    pub fn priorities(&self) -> impl Iterator<Item = Priority> + '_ {
        self.priorities.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.priorities.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&task.status()))
            && (self.priorities.is_empty() || self.priorities.contains(&task.priority()))
    }

    /// Keep matching tasks, preserving their order.
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        if !self.is_empty() {
            tasks.retain(|task| self.matches(task));
        }
        tasks
    }
}

pub fn filter_tasks<I, S>(tasks: Vec<Task>, tokens: I) -> Vec<Task>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TaskFilter::from_tokens(tokens).apply(tasks)
}
