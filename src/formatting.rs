//! User-facing reply text
//!
//! Every message the session prints is built here so the wording stays in one
//! place.

use crate::task::Task;

pub const GREETING: &str = "Hello! I'm Taskline.\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
pub const UNSUPPORTED: &str = "Erm actually, your keyword's not supported";

/// Render the full list with 1-based numbering
pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "There are no tasks in your list".to_string();
    }

    let mut result = String::from("Here are the tasks in your list:");
    for (index, task) in tasks.iter().enumerate() {
        result.push_str(&format!("\n{}. {}", index + 1, task));
    }
    result
}

/// Render search results, numbered by their position in the full list
///
/// # Arguments
/// * `matches` - (task number, task) pairs from `TaskList::find`
/// * `keyword` - The keyword searched for, echoed when nothing matches
pub fn format_matches(matches: &[(usize, &Task)], keyword: &str) -> String {
    if matches.is_empty() {
        return format!("No tasks match \"{}\"", keyword);
    }

    let mut result = String::from("Here are the matching tasks in your list:");
    for (number, task) in matches {
        result.push_str(&format!("\n{}. {}", number, task));
    }
    result
}

pub fn format_count(count: usize) -> String {
    match count {
        1 => "There is now 1 task in the list".to_string(),
        _ => format!("There are now {} tasks in the list", count),
    }
}

pub fn format_added(task: &Task, count: usize) -> String {
    format!("Added: {}\n{}", task, format_count(count))
}

pub fn format_deleted(task: &Task, number: usize, count: usize) -> String {
    format!("Deleted task {}: {}\n{}", number, task, format_count(count))
}

pub fn format_marked(task: &Task) -> String {
    let state = if task.is_done() { "done" } else { "undone" };
    format!("Marked this task as {}:\n{}", state, task)
}

/// Startup message describing what was found on disk
pub fn format_load_status(existed: bool, loaded: usize) -> String {
    match (existed, loaded) {
        (false, _) => "No save found, created a new save".to_string(),
        (true, 0) => "Save found, no tasks in save".to_string(),
        (true, 1) => "Save found, loaded 1 task".to_string(),
        (true, n) => format!("Save found, loaded {} tasks", n),
    }
}
