use crate::task::{KindTag, STATUS_COMPLETE, Task};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Separator between fields of a saved record
pub const FIELD_SEPARATOR: &str = "; ";

/// Line-oriented backing file for the task list
///
/// Each write opens, writes and closes the file; no handle outlives a call.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Create the backing file and any missing parent directories
    ///
    /// # Returns
    /// `true` if the file exists afterwards; I/O failures are logged, not raised
    pub fn initialize(&self) -> bool {
        match self.try_initialize() {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.file_path.display(), "Failed to create save file: {:#}", e);
                false
            }
        }
    }

    fn try_initialize(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        if !self.file_path.exists() {
            fs::File::create(&self.file_path)
                .with_context(|| format!("Failed to create {}", self.file_path.display()))?;
        }
        Ok(())
    }

    /// Read every well-formed record from the backing file
    ///
    /// Malformed lines are skipped with a warning. A missing file yields an
    /// empty list.
    ///
    /// # Arguments
    /// * `now` - Reference time for any weekday expression found in a record
    pub fn load(&self, now: NaiveDateTime) -> Result<Vec<Task>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;

        // Decoded per line so one bad byte costs only its own record
        let mut tasks = Vec::new();
        for (index, raw) in content.split(|&b| b == b'\n').enumerate() {
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line.strip_suffix('\r').unwrap_or(line),
                Err(e) => {
                    warn!(line = index + 1, "Skipping saved record: {}", e);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line, now) {
                Ok(task) => tasks.push(task),
                Err(reason) => warn!(line = index + 1, "Skipping saved record: {}", reason),
            }
        }
        debug!(count = tasks.len(), path = %self.file_path.display(), "Loaded tasks");
        Ok(tasks)
    }

    /// Append a single record to the end of the backing file
    pub fn append_one(&self, task: &Task) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))?;
        writeln!(file, "{}", task.to_save_format())
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }

    /// Replace the backing file with the given tasks, in order
    pub fn rewrite_all(&self, tasks: &[Task]) -> Result<()> {
        let content: String = tasks
            .iter()
            .map(|task| format!("{}\n", task.to_save_format()))
            .collect();
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

/// Rebuild a task from one saved line
///
/// # Returns
/// The task, or a short reason the line was rejected
fn parse_record(line: &str, now: NaiveDateTime) -> Result<Task, String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [tag, status, description, times @ ..] = fields.as_slice() else {
        return Err(format!("expected at least 3 fields, found {}", fields.len()));
    };

    let kind: KindTag = tag.parse()?;
    let built = match (kind, times) {
        (KindTag::Plain, _) => Task::plain(*description),
        (KindTag::Todo, _) => Task::todo(*description),
        (KindTag::Deadline, [by, ..]) => Task::deadline(*description, by, now),
        (KindTag::Event, [start, end, ..]) => Task::event(*description, start, end, now),
        (KindTag::Deadline | KindTag::Event, _) => {
            return Err(format!("{} record is missing its time field(s)", tag));
        }
    };

    let mut task = built.map_err(|e| e.to_string())?;
    if *status == STATUS_COMPLETE {
        task.mark_done();
    }
    Ok(task)
}
