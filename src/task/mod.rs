//! Task domain model
//!
//! - `model`: the `Task` type, its variants and their display/save formats
//! - `date`: free-text time expressions used by deadline and event constructors

pub mod date;
mod model;

pub use date::{DateFormatError, DayDefault, local_now, parse_time_expression};
pub use model::{
    KindTag, STATUS_COMPLETE, STATUS_INCOMPLETE, Task, TaskError, TaskKind, TimeField,
};
