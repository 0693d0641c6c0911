pub mod commands;
pub mod deadline;

pub use deadline::{compute_progress, DeadlineProgress, DeadlineUrgency};
