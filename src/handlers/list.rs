//! List and find handlers

use crate::Session;
use crate::formatting;

impl Session {
    pub fn handle_list(&self) -> String {
        formatting::format_task_list(self.tasks.all())
    }

    /// Show tasks whose description contains `keyword`, ignoring case
    pub fn handle_find(&self, keyword: &str) -> String {
        let matches = self.tasks.find(keyword);
        formatting::format_matches(&matches, keyword)
    }
}
