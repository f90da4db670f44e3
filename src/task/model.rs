use super::date::{self, DateFormatError, DayDefault};
use crate::storage::FIELD_SEPARATOR;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure while constructing a task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task description cannot be empty")]
    EmptyDescription,
    #[error("task description cannot contain \"; \"")]
    ReservedSeparator,
    #[error("{field} is invalid: {source}")]
    Date {
        field: TimeField,
        source: DateFormatError,
    },
}

/// Which timestamp of a task a time expression was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    By,
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeField::By => "deadline time",
            TimeField::Start => "event start time",
            TimeField::End => "event end time",
        };
        f.write_str(name)
    }
}

fn resolve(
    text: &str,
    default: DayDefault,
    field: TimeField,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, TaskError> {
    date::parse_time_expression(text, default, now)
        .map_err(|source| TaskError::Date { field, source })
}

/// Variant of a task, fixed at construction
///
/// Each variant owns the timestamps it needs; `Plain` and `Todo` carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Untyped task, only produced by loading a `Task` record
    Plain,
    Todo,
    Deadline { by: NaiveDateTime },
    /// No ordering is enforced between `start` and `end`
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TaskKind {
    /// Record tag written as the first field of a saved line
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::Plain => "Task",
            TaskKind::Todo => "Todo",
            TaskKind::Deadline { .. } => "Deadline",
            TaskKind::Event { .. } => "Event",
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            TaskKind::Plain => "",
            TaskKind::Todo => "[T]",
            TaskKind::Deadline { .. } => "[D]",
            TaskKind::Event { .. } => "[E]",
        }
    }
}

/// Record tag as read back from a saved line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    Plain,
    Todo,
    Deadline,
    Event,
}

impl FromStr for KindTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Task" => Ok(KindTag::Plain),
            "Todo" => Ok(KindTag::Todo),
            "Deadline" => Ok(KindTag::Deadline),
            "Event" => Ok(KindTag::Event),
            _ => Err(format!(
                "Unknown task type '{}'. Valid types are: Task, Todo, Deadline, Event",
                s
            )),
        }
    }
}

/// Completion state as written to the backing file
pub const STATUS_COMPLETE: &str = "Complete";
pub const STATUS_INCOMPLETE: &str = "Incomplete";

/// A single trackable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Build a task from an already-resolved kind
    ///
    /// # Arguments
    /// * `description` - Free text, trimmed; must not be empty or hold the
    ///   field separator of the backing file
    /// * `kind` - The variant and its timestamps
    pub fn new(description: impl Into<String>, kind: TaskKind) -> Result<Self, TaskError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        if description.contains(FIELD_SEPARATOR) {
            return Err(TaskError::ReservedSeparator);
        }
        Ok(Self {
            description,
            done: false,
            kind,
        })
    }

    pub fn plain(description: impl Into<String>) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Plain)
    }

    pub fn todo(description: impl Into<String>) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Todo)
    }

    /// Create a deadline, resolving `by` against `now`
    ///
    /// A bare weekday resolves to 23:59 on that day.
    pub fn deadline(
        description: impl Into<String>,
        by: &str,
        now: NaiveDateTime,
    ) -> Result<Self, TaskError> {
        let by = resolve(by, DayDefault::EndOfDay, TimeField::By, now)?;
        Self::new(description, TaskKind::Deadline { by })
    }

    /// Create an event, resolving both endpoints against `now`
    ///
    /// A bare weekday resolves to 09:00 on that day.
    pub fn event(
        description: impl Into<String>,
        start: &str,
        end: &str,
        now: NaiveDateTime,
    ) -> Result<Self, TaskError> {
        let start = resolve(start, DayDefault::StartOfDay, TimeField::Start, now)?;
        let end = resolve(end, DayDefault::StartOfDay, TimeField::End, now)?;
        Self::new(description, TaskKind::Event { start, end })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Case-insensitive substring match on the description only
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    /// Serialize as one `; `-delimited record, without a trailing newline
    ///
    /// Timestamps are always written in the absolute save format.
    pub fn to_save_format(&self) -> String {
        let status = if self.done {
            STATUS_COMPLETE
        } else {
            STATUS_INCOMPLETE
        };
        let mut fields = vec![
            self.kind.tag().to_string(),
            status.to_string(),
            self.description.clone(),
        ];
        match &self.kind {
            TaskKind::Plain | TaskKind::Todo => {}
            TaskKind::Deadline { by } => fields.push(date::format_for_save(by)),
            TaskKind::Event { start, end } => {
                fields.push(date::format_for_save(start));
                fields.push(date::format_for_save(end));
            }
        }
        fields.join(FIELD_SEPARATOR)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.done { "X" } else { " " };
        write!(f, "{}[{}] {}", self.kind.marker(), check, self.description)?;
        match &self.kind {
            TaskKind::Plain | TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", date::format_for_display(by)),
            TaskKind::Event { start, end } => write!(
                f,
                " (from: {}, to: {})",
                date::format_for_display(start),
                date::format_for_display(end)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_todo_display_and_save() {
        let task = Task::todo("buy milk").unwrap();
        assert_eq!(task.to_string(), "[T][ ] buy milk");
        assert_eq!(task.to_save_format(), "Todo; Incomplete; buy milk");
    }

    #[test]
    fn test_plain_task_has_no_marker() {
        let mut task = Task::plain("water plants").unwrap();
        task.mark_done();
        assert_eq!(task.to_string(), "[X] water plants");
        assert_eq!(task.to_save_format(), "Task; Complete; water plants");
    }

    #[test]
    fn test_deadline_display_and_save() {
        let task = Task::deadline("buy cake", "2025-01-01 1000", fixed_now()).unwrap();
        assert_eq!(task.description(), "buy cake");
        assert_eq!(task.to_string(), "[D][ ] buy cake (by: 01 Jan 2025 1000)");
        assert_eq!(
            task.to_save_format(),
            "Deadline; Incomplete; buy cake; 2025-01-01 1000"
        );
    }

    #[test]
    fn test_event_display_and_save() {
        let task = Task::event(
            "trip",
            "2025-06-01 0900",
            "2025-06-03 1800",
            fixed_now(),
        )
        .unwrap();
        assert_eq!(
            task.to_string(),
            "[E][ ] trip (from: 01 Jun 2025 0900, to: 03 Jun 2025 1800)"
        );
        assert_eq!(
            task.to_save_format(),
            "Event; Incomplete; trip; 2025-06-01 0900; 2025-06-03 1800"
        );
    }

    #[test]
    fn test_event_end_before_start_is_kept() {
        let task = Task::event("rewind", "2025-06-03 1800", "2025-06-01 0900", fixed_now());
        assert!(task.is_ok());
    }

    #[test]
    fn test_weekday_deadline_saves_resolved_time() {
        // fixed_now is a Wednesday
        let task = Task::deadline("report", "fri", fixed_now()).unwrap();
        assert_eq!(
            task.to_save_format(),
            "Deadline; Incomplete; report; 2025-03-07 2359"
        );
    }

    #[test]
    fn test_weekday_event_defaults_to_morning() {
        let task = Task::event("standup", "thu", "thu 0930", fixed_now()).unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::Event {
                start: NaiveDate::from_ymd_opt(2025, 3, 6)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 3, 6)
                    .unwrap()
                    .and_hms_opt(9, 30, 0)
                    .unwrap(),
            }
        );
    }

    #[test]
    fn test_mark_then_unmark_restores_display() {
        let mut task = Task::deadline("pay rent", "2025-04-01 0000", fixed_now()).unwrap();
        let before = task.to_string();
        task.mark_done();
        assert_eq!(task.to_string(), "[D][X] pay rent (by: 01 Apr 2025 0000)");
        task.mark_undone();
        assert_eq!(task.to_string(), before);
    }

    #[test]
    fn test_empty_description_rejected() {
        assert_eq!(Task::todo("   "), Err(TaskError::EmptyDescription));
    }

    // A separator in the text would split the saved record on reload
    #[test]
    fn test_separator_in_description_rejected() {
        assert_eq!(Task::todo("a; b"), Err(TaskError::ReservedSeparator));
        assert_eq!(
            Task::deadline("pay; rent", "2025-01-01 1000", fixed_now()),
            Err(TaskError::ReservedSeparator)
        );

        let task = Task::todo("a;b and a ;b").unwrap();
        assert_eq!(task.to_save_format(), "Todo; Incomplete; a;b and a ;b");
    }

    #[test]
    fn test_bad_time_rejected() {
        let err = Task::deadline("x", "someday", fixed_now()).unwrap_err();
        assert_eq!(
            err,
            TaskError::Date {
                field: TimeField::By,
                source: DateFormatError {
                    input: "someday".to_string()
                },
            }
        );

        let err = Task::event("x", "mon", "mon 2500", fixed_now()).unwrap_err();
        assert!(matches!(err, TaskError::Date { field: TimeField::End, .. }));
    }

    #[test]
    fn test_keyword_matches_description_only() {
        let task = Task::deadline("Submit REPORT", "2025-01-01 1000", fixed_now()).unwrap();
        assert!(task.matches_keyword("report"));
        assert!(task.matches_keyword("mit rep"));
        assert!(!task.matches_keyword("2025"));
        assert!(!task.matches_keyword("Jan"));
    }

    #[test]
    fn test_kind_tag_parse() {
        assert_eq!("Todo".parse::<KindTag>(), Ok(KindTag::Todo));
        assert_eq!("Task".parse::<KindTag>(), Ok(KindTag::Plain));
        assert!("todo".parse::<KindTag>().is_err());
    }
}
