//! Ordered, 1-indexed task collection

use crate::task::Task;
use thiserror::Error;

/// Task number outside `[1, count]`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task {number} does not exist, the list holds {count} task(s)")]
pub struct IndexError {
    pub number: usize,
    pub count: usize,
}

/// The in-memory task store
///
/// Insertion order is display order. The list is the only owner of its tasks;
/// callers borrow them for the duration of a single command.
#[derive(Debug, Default, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty task list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks, also the highest valid task number
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in display order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a task; it becomes task number `len()`
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Borrow task `number` (1-based)
    pub fn get(&self, number: usize) -> Result<&Task, IndexError> {
        let index = self.index_of(number)?;
        Ok(&self.tasks[index])
    }

    /// Mutably borrow task `number` (1-based)
    pub fn get_mut(&mut self, number: usize) -> Result<&mut Task, IndexError> {
        let index = self.index_of(number)?;
        Ok(&mut self.tasks[index])
    }

    /// Remove and return task `number`
    ///
    /// Every task after it moves down one position.
    pub fn delete(&mut self, number: usize) -> Result<Task, IndexError> {
        let index = self.index_of(number)?;
        Ok(self.tasks.remove(index))
    }

    /// Tasks whose description contains `keyword`, ignoring case
    ///
    /// # Returns
    /// Pairs of (task number, task) in list order; the list itself is untouched
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.matches_keyword(keyword))
            .map(|(index, task)| (index + 1, task))
            .collect()
    }

    fn index_of(&self, number: usize) -> Result<usize, IndexError> {
        if number == 0 || number > self.tasks.len() {
            return Err(IndexError {
                number,
                count: self.tasks.len(),
            });
        }
        Ok(number - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
