//! Command parser
//!
//! Turns one input line into a [`Command`]. Parsing is purely textual: time
//! expressions are kept as raw text until [`Command::build_task`] runs, so a
//! bad date can never hide a missing separator, and nothing touches the task
//! list until the whole line has been accepted.

use crate::error::CommandError;
use crate::task::Task;
use chrono::NaiveDateTime;

const DEADLINE_USAGE: &str = "Deadline format should be: deadline <description> /by <time>";
const EVENT_USAGE: &str =
    "Invalid event format, should be: event <description> /from <start> /to <end>";

/// One fully-parsed user instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    ListAll,
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Find(String),
    CreateTodo {
        description: String,
    },
    CreateDeadline {
        description: String,
        by: String,
    },
    CreateEvent {
        description: String,
        from: String,
        to: String,
    },
    Unrecognized,
}

impl Command {
    /// Construct the task for a creation command
    ///
    /// Time expressions are resolved against `now` here, after the textual
    /// checks in [`parse_command`] have passed.
    ///
    /// # Returns
    /// `Ok(None)` for commands that do not create a task
    pub fn build_task(&self, now: NaiveDateTime) -> Result<Option<Task>, CommandError> {
        let task = match self {
            Command::CreateTodo { description } => Task::todo(description.as_str())?,
            Command::CreateDeadline { description, by } => {
                Task::deadline(description.as_str(), by, now)?
            }
            Command::CreateEvent {
                description,
                from,
                to,
            } => Task::event(description.as_str(), from, to, now)?,
            _ => return Ok(None),
        };
        Ok(Some(task))
    }

    /// Short name used in log records
    pub fn name(&self) -> &'static str {
        match self {
            Command::Quit => "bye",
            Command::ListAll => "list",
            Command::Mark(_) => "mark",
            Command::Unmark(_) => "unmark",
            Command::Delete(_) => "delete",
            Command::Find(_) => "find",
            Command::CreateTodo { .. } => "todo",
            Command::CreateDeadline { .. } => "deadline",
            Command::CreateEvent { .. } => "event",
            Command::Unrecognized => "unrecognized",
        }
    }
}

/// Parse one line of input
///
/// Keywords match as literal prefixes in a fixed order: exact `bye`, exact
/// `list`, `mark `, `unmark `, `delete`, `find `, then `todo`, `deadline`
/// and `event`. Only the line terminator is stripped before matching.
///
/// # Arguments
/// * `line` - Raw input line
/// * `task_count` - Current list size, used to range-check task numbers
///
/// # Returns
/// The command, or the first validation failure found
pub fn parse_command(line: &str, task_count: usize) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line == "bye" {
        return Ok(Command::Quit);
    }
    if line == "list" {
        return Ok(Command::ListAll);
    }
    if line.starts_with("mark ") {
        return parse_task_number(line, "mark", task_count).map(Command::Mark);
    }
    if line.starts_with("unmark ") {
        return parse_task_number(line, "unmark", task_count).map(Command::Unmark);
    }
    if line.starts_with("delete") {
        return parse_task_number(line, "delete", task_count).map(Command::Delete);
    }
    if let Some(rest) = line.strip_prefix("find ") {
        return parse_find(rest);
    }
    if let Some(rest) = line.strip_prefix("todo") {
        return parse_todo(rest);
    }
    if let Some(rest) = line.strip_prefix("deadline") {
        return parse_deadline(rest);
    }
    if let Some(rest) = line.strip_prefix("event") {
        return parse_event(rest);
    }

    Ok(Command::Unrecognized)
}

/// The task number is the second of exactly two tokens on the line
fn parse_task_number(line: &str, keyword: &str, task_count: usize) -> Result<usize, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [_, token] = tokens.as_slice() else {
        return Err(CommandError::Format(format!(
            "Invalid format for {keyword} command. Correct format: {keyword} <task number>"
        )));
    };

    let number: i64 = token.parse().map_err(|_| CommandError::NumberFormat {
        input: token.to_string(),
    })?;

    match usize::try_from(number) {
        Ok(n) if (1..=task_count).contains(&n) => Ok(n),
        _ => Err(CommandError::TaskRange {
            number,
            count: task_count,
        }),
    }
}

fn parse_find(rest: &str) -> Result<Command, CommandError> {
    let keyword = rest.trim();
    if keyword.is_empty() {
        return Err(CommandError::Validation(
            "The keyword to find cannot be empty".to_string(),
        ));
    }
    Ok(Command::Find(keyword.to_string()))
}

fn parse_todo(rest: &str) -> Result<Command, CommandError> {
    let description = rest.trim();
    if description.is_empty() {
        return Err(CommandError::Validation(
            "The description of a todo cannot be empty".to_string(),
        ));
    }
    Ok(Command::CreateTodo {
        description: description.to_string(),
    })
}

fn parse_deadline(rest: &str) -> Result<Command, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(CommandError::Validation(
            "The description of a deadline cannot be empty".to_string(),
        ));
    }

    // Padding lets a separator at either edge still split into an empty half
    let padded = format!(" {rest} ");
    let Some(by_index) = padded.find(" /by ") else {
        return Err(CommandError::Format(DEADLINE_USAGE.to_string()));
    };
    let description = padded[..by_index].trim();
    let by = padded[by_index + " /by ".len()..].trim();

    if description.is_empty() {
        return Err(CommandError::Validation(
            "The description of a deadline cannot be empty".to_string(),
        ));
    }
    if by.is_empty() {
        return Err(CommandError::Validation(
            "The deadline time cannot be empty".to_string(),
        ));
    }

    Ok(Command::CreateDeadline {
        description: description.to_string(),
        by: by.to_string(),
    })
}

fn parse_event(rest: &str) -> Result<Command, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(CommandError::Validation(
            "The description of an event cannot be empty".to_string(),
        ));
    }

    let padded = format!(" {rest} ");
    let (Some(from_index), Some(to_index)) = (padded.find(" /from "), padded.find(" /to ")) else {
        return Err(CommandError::Format(EVENT_USAGE.to_string()));
    };
    if to_index <= from_index {
        return Err(CommandError::Format(EVENT_USAGE.to_string()));
    }

    let description = padded[..from_index].trim();
    // `/from /to` shares the space between markers, leaving no start text
    let from = padded
        .get(from_index + " /from ".len()..to_index)
        .unwrap_or("")
        .trim();
    let to = padded[to_index + " /to ".len()..].trim();

    if description.is_empty() {
        return Err(CommandError::Validation(
            "The description of an event cannot be empty".to_string(),
        ));
    }
    if from.is_empty() {
        return Err(CommandError::Validation(
            "The start time of an event cannot be empty".to_string(),
        ));
    }
    if to.is_empty() {
        return Err(CommandError::Validation(
            "The end time of an event cannot be empty".to_string(),
        ));
    }

    Ok(Command::CreateEvent {
        description: description.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}
