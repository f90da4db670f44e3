//! Errors reported at the command boundary
//!
//! Each variant's `Display` is the single line shown to the user.

use crate::task::{TaskError, TimeField};
use crate::task_list::IndexError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A required segment is missing or blank
    #[error("{0}")]
    Validation(String),

    /// A required separator or keyword is missing or misplaced
    #[error("{0}")]
    Format(String),

    /// Task number is not an integer
    #[error("Invalid number format: '{input}' is not a task number")]
    NumberFormat { input: String },

    /// Task number is an integer outside the current list
    #[error("Invalid task number {number}. {}", range_hint(.count))]
    TaskRange { number: i64, count: usize },

    /// Time expression could not be resolved
    #[error(
        "The {field} '{input}' is invalid, use YYYY-MM-DD HHMM, a weekday (mon) or a weekday with a time (mon 1900)"
    )]
    InvalidTime { field: TimeField, input: String },
}

fn range_hint(count: &usize) -> String {
    match *count {
        0 => "There are no tasks in the list yet".to_string(),
        _ => format!("Input a task from 1 to {}", count),
    }
}

impl From<TaskError> for CommandError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::EmptyDescription => {
                CommandError::Validation("The description of a task cannot be empty".to_string())
            }
            TaskError::ReservedSeparator => CommandError::Validation(format!(
                "The description cannot contain \"{}\"",
                crate::storage::FIELD_SEPARATOR
            )),
            TaskError::Date { field, source } => CommandError::InvalidTime {
                field,
                input: source.input,
            },
        }
    }
}

impl From<IndexError> for CommandError {
    fn from(err: IndexError) -> Self {
        CommandError::TaskRange {
            number: i64::try_from(err.number).unwrap_or(i64::MAX),
            count: err.count,
        }
    }
}
