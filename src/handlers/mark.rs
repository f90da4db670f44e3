//! Mark and unmark handlers

use crate::Session;
use crate::error::CommandError;
use crate::formatting;
use tracing::info;

impl Session {
    /// Set the completion state of task `number` and rewrite the backing file
    ///
    /// # Arguments
    /// * `number` - 1-based task number
    /// * `done` - `true` for mark, `false` for unmark
    pub fn handle_mark(&mut self, number: usize, done: bool) -> Result<String, CommandError> {
        let task = self.tasks.get_mut(number)?;
        if done {
            task.mark_done();
        } else {
            task.mark_undone();
        }
        let mut reply = formatting::format_marked(task);
        info!(number, done, "Updated task status");

        if let Some(warning) = self.save_all() {
            reply.push('\n');
            reply.push_str(&warning);
        }
        Ok(reply)
    }
}
