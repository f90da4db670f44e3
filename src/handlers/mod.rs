//! Command handlers for the task session
//!
//! Each handler is an `impl Session` block in its own file.

pub mod add;
pub mod delete;
pub mod list;
pub mod mark;
