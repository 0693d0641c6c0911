pub mod commands;
pub mod ticker;

pub use ticker::{build_snapshot, DashboardSnapshot, PlanProgress, RefreshTicker};
