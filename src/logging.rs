//! Logging macros for the planner with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! - 0: SILENT (only errors)
//! - 1: PASSES (pass start/finish, cycle gate outcome)
//! - 2: TASKS (per-task scheduling decisions)
//! - 3: DEBUG (full traversal internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_PASSES: u8 = 1;
pub const VERBOSITY_TASKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at PASSES level (verbosity >= 1).
///
/// Used for: pass boundaries, completion time, cycle gate results.
#[macro_export]
macro_rules! log_passes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_PASSES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at TASKS level (verbosity >= 2).
///
/// Used for: per-task start-time relaxations and slack results.
#[macro_export]
macro_rules! log_tasks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TASKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: DFS stack movements and worklist internals.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
