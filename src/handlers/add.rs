//! Add handler for todo, deadline and event commands

use crate::Session;
use crate::error::CommandError;
use crate::formatting;
use crate::parser::Command;
use tracing::info;

impl Session {
    /// Build the task for a creation command, append it, and save just that line
    pub fn handle_add(&mut self, command: &Command) -> Result<String, CommandError> {
        let Some(task) = command.build_task(self.now())? else {
            return Err(CommandError::Format(format!(
                "'{}' does not create a task",
                command.name()
            )));
        };

        let mut reply = formatting::format_added(&task, self.tasks.len() + 1);
        let saved = self.storage.append_one(&task);
        info!(kind = task.kind().tag(), "Added task");
        self.tasks.add(task);

        if let Err(e) = saved {
            reply.push('\n');
            reply.push_str(&Self::save_failure(&e));
        }
        Ok(reply)
    }
}
