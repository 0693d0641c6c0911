//! Conditional logging macros gated on a module-level `ENABLE_LOGS` const.
//!
//! Chatty modules (the sync path) define `const ENABLE_LOGS: bool = ...;`
//! and use these instead of the plain `log` macros, so per-request noise
//! can be silenced without touching the global filter.

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
