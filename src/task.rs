//! Task entity for agen.
//!
//! A `Task` owns its fields and validates every change before applying it.
//! It knows nothing about storage; see `codec` and `store` for persistence.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};

pub const TITLE_MIN_LEN: usize = 1;
pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 65535;
/// Length of a hyphenated UUID, the canonical task identifier.
pub const ID_LEN: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Exact keyword match (`low`, `medium`, `high`).
    pub fn from_keyword(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == value)
    }
}

impl TryFrom<u8> for Priority {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            other => Err(Error::InvalidPriority(other)),
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Priority::from_keyword(s).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "invalid priority '{}': must be low, medium, or high",
                s
            ))
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo = 3,
    Doing = 4,
    Done = 5,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Label used in the one-line summary.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To do",
            Status::Doing => "Doing",
            Status::Done => "Done",
        }
    }

    /// Exact keyword match (`todo`, `doing`, `done`).
    pub fn from_keyword(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.keyword() == value)
    }
}

impl TryFrom<u8> for Status {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            3 => Ok(Status::Todo),
            4 => Ok(Status::Doing),
            5 => Ok(Status::Done),
            other => Err(Error::InvalidStatus(other)),
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::from_keyword(s).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "invalid status '{}': must be todo, doing, or done",
                s
            ))
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Something to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    #[serde(rename = "id")]
    identifier: String,
    title: String,
    description: String,
    is_periodic: bool,
    priority: Priority,
    status: Status,
}

impl Task {
    /// Build a task with explicit fields and a fresh identifier.
    ///
    /// Checks run in order (title, description, priority, status) and the
    /// first violation is returned.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        is_periodic: bool,
        priority: u8,
        status: u8,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();
        check_title(&title)?;
        check_description(&description)?;
        let priority = Priority::try_from(priority)?;
        let status = Status::try_from(status)?;

        Ok(Self {
            identifier: generate_identifier(),
            title,
            description,
            is_periodic,
            priority,
            status,
        })
    }

    /// Build a task with Medium priority, Todo status and no description.
    pub fn new_default(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        check_title(&title)?;

        Ok(Self {
            identifier: generate_identifier(),
            title,
            description: String::new(),
            is_periodic: false,
            priority: Priority::Medium,
            status: Status::Todo,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_periodic(&self) -> bool {
        self.is_periodic
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        check_description(&description)?;
        self.description = description;
        Ok(())
    }

    pub fn set_periodicity(&mut self, is_periodic: bool) {
        self.is_periodic = is_periodic;
    }

    pub fn set_priority(&mut self, priority: u8) -> Result<()> {
        self.priority = Priority::try_from(priority)?;
        Ok(())
    }

    pub fn set_status(&mut self, status: u8) -> Result<()> {
        self.status = Status::try_from(status)?;
        Ok(())
    }

    /// Replace the generated identifier with the one read from storage.
    pub(crate) fn restore_identifier(&mut self, identifier: String) {
        self.identifier = identifier;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} <{}> {}",
            self.status.label(),
            self.title,
            self.priority,
            self.identifier
        )
    }
}

fn generate_identifier() -> String {
    Uuid::new_v4().to_string()
}

fn check_title(title: &str) -> Result<()> {
    if title.len() < TITLE_MIN_LEN {
        return Err(Error::TitleTooShort);
    }
    if title.len() > TITLE_MAX_LEN {
        return Err(Error::TitleTooLong);
    }
    Ok(())
}

fn check_description(description: &str) -> Result<()> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err(Error::DescriptionTooLong);
    }
    Ok(())
}

/// Check that `id` can name a task file: 1 to 36 bytes, no path separators.
pub fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > ID_LEN {
        return Err(Error::InvalidIdentifier(format!(
            "'{id}' must be 1 to {ID_LEN} characters"
        )));
    }
    if id.contains(['/', '\\', '\0']) || id == "." || id == ".." {
        return Err(Error::InvalidIdentifier(format!(
            "'{id}' is not a valid file name"
        )));
    }
    Ok(())
}
