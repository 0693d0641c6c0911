pub mod commands;
pub mod set;
pub mod stats;
pub mod tracker;

pub use set::{ReconcileError, SessionSet};
pub use stats::{compute_stats, StudyStats};
pub use tracker::{SessionTracker, TrackerCapabilities};
