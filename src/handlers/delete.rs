//! Delete handler

use crate::Session;
use crate::error::CommandError;
use crate::formatting;
use tracing::info;

impl Session {
    /// Remove task `number` and rewrite the backing file
    pub fn handle_delete(&mut self, number: usize) -> Result<String, CommandError> {
        let removed = self.tasks.delete(number)?;
        info!(number, "Deleted task");

        let mut reply = formatting::format_deleted(&removed, number, self.tasks.len());
        if let Some(warning) = self.save_all() {
            reply.push('\n');
            reply.push_str(&warning);
        }
        Ok(reply)
    }
}
