//! Taskline Library
//!
//! A line-oriented personal task tracker. Each input line is one command;
//! tasks are kept in memory and mirrored to a `; `-delimited text file so the
//! list survives restarts.
//!
//! # Architecture
//!
//! - **Session**: `Session` - executes one command line at a time and renders the reply
//! - **Parser**: `parser` module - turns text into a validated `Command`
//! - **Domain**: `task` and `task_list` modules - task variants, time expressions, the ordered list
//! - **Persistence**: `storage` module - the backing text file
//!
//! # Example
//!
//! ```no_run
//! use taskline::{Session, Storage};
//!
//! let (mut session, banner) = Session::open(Storage::new("data/tasks.txt"));
//! println!("{}", banner);
//! let reply = session.handle_line("todo buy milk");
//! println!("{}", reply.text);
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod storage;
pub mod task;
pub mod task_list;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

// Re-export commonly used types
pub use config::Config;
pub use error::CommandError;
pub use parser::{Command, parse_command};
pub use storage::Storage;
pub use task::{Task, TaskKind};
pub use task_list::TaskList;

/// Response to one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text to show the user, possibly several lines
    pub text: String,
    /// Whether the session should end after showing `text`
    pub exit: bool,
}

impl Reply {
    fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }

    fn farewell() -> Self {
        Self {
            text: formatting::FAREWELL.to_string(),
            exit: true,
        }
    }
}

/// Source of the current time, used to resolve weekday expressions
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// A running task session
///
/// Owns the task list and its backing file. All mutations go through
/// `handle_line`; the in-memory list stays authoritative when a save fails and
/// the next successful save brings the file back in line.
pub struct Session {
    pub(crate) tasks: TaskList,
    pub(crate) storage: Storage,
    clock: Clock,
}

impl Session {
    /// Open a session on `storage` using the local wall clock
    ///
    /// # Returns
    /// The session and the startup banner to show the user
    pub fn open(storage: Storage) -> (Self, String) {
        Self::open_with_clock(storage, Box::new(task::local_now))
    }

    /// Open a session with an explicit clock
    ///
    /// Loads the backing file if present, otherwise creates it. Neither a read
    /// failure nor a create failure is fatal; the session starts empty.
    pub fn open_with_clock(storage: Storage, clock: Clock) -> (Self, String) {
        let mut banner = Vec::new();
        let existed = storage.exists();

        let tasks = if existed {
            match storage.load(clock()) {
                Ok(tasks) => {
                    banner.push(formatting::format_load_status(true, tasks.len()));
                    TaskList::from(tasks)
                }
                Err(e) => {
                    warn!("Failed to load tasks: {:#}", e);
                    banner.push(format!(
                        "Error reading save file, starting with an empty list: {:#}",
                        e
                    ));
                    TaskList::new()
                }
            }
        } else if storage.initialize() {
            banner.push(formatting::format_load_status(false, 0));
            TaskList::new()
        } else {
            banner.push(format!(
                "Error creating save file at {}, changes will not be saved",
                storage.path().display()
            ));
            TaskList::new()
        };

        if !tasks.is_empty() {
            banner.push(formatting::format_task_list(tasks.all()));
        }
        banner.push(formatting::GREETING.to_string());
        info!(
            path = %storage.path().display(),
            count = tasks.len(),
            "Session started"
        );

        let session = Self {
            tasks,
            storage,
            clock,
        };
        (session, banner.join("\n"))
    }

    /// The current task list
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Execute one input line
    ///
    /// Errors never escape: each becomes a single line of reply text and the
    /// task list is left untouched.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match parser::parse_command(line, self.tasks.len()) {
            Ok(command) => command,
            Err(e) => {
                debug!("Rejected input: {}", e);
                return Reply::message(e.to_string());
            }
        };
        debug!(command = command.name(), "Parsed command");

        let result = match &command {
            Command::Quit => return Reply::farewell(),
            Command::ListAll => Ok(self.handle_list()),
            Command::Find(keyword) => Ok(self.handle_find(keyword)),
            Command::Mark(number) => self.handle_mark(*number, true),
            Command::Unmark(number) => self.handle_mark(*number, false),
            Command::Delete(number) => self.handle_delete(*number),
            Command::CreateTodo { .. }
            | Command::CreateDeadline { .. }
            | Command::CreateEvent { .. } => self.handle_add(&command),
            Command::Unrecognized => Ok(formatting::UNSUPPORTED.to_string()),
        };

        match result {
            Ok(text) => Reply::message(text),
            Err(e) => {
                debug!("Command failed: {}", e);
                Reply::message(e.to_string())
            }
        }
    }

    /// Execute one raw input line that may not be valid UTF-8
    ///
    /// Undecodable bytes become U+FFFD; the trailing line terminator is dropped.
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Reply {
        let line = String::from_utf8_lossy(bytes);
        self.handle_line(line.trim_end_matches(['\r', '\n']))
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// Rewrite the backing file from the current list
    ///
    /// # Returns
    /// A warning line for the user if the write failed
    pub(crate) fn save_all(&self) -> Option<String> {
        self.storage
            .rewrite_all(self.tasks.all())
            .err()
            .map(|e| Self::save_failure(&e))
    }

    pub(crate) fn save_failure(error: &anyhow::Error) -> String {
        warn!("Failed to save tasks: {:#}", error);
        format!("Error writing to save file: {:#}", error)
    }
}
