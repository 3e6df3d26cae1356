// Logging for the setup step. CI log viewers keep stdout for workflow
// commands, so all human-readable output goes to stderr with a colored
// level prefix. Debug messages only appear when the step runs with
// --debug (or the runner sets RUNNER_DEBUG=1).

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// `log_info!` for normal step progress.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => (eprintln!("{} {}", "[INFO]".bright_green(), format!($($arg)*)));
}

/// `log_warn!` for non-fatal conditions (failed plugin installs, missing
/// runner command files).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => (eprintln!("{} {}", "[WARN]".bright_yellow(), format!($($arg)*)));
}

/// `log_error!` for fatal failures, printed once at the top level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => (eprintln!("{} {}", "[ERROR]".bright_red(), format!($($arg)*)));
}

/// `log_debug!` for internal tracing; suppressed unless debug mode is on.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
            eprintln!("{} {}", "[DEBUG]".dimmed(), format!($($arg)*));
        }
    };
}

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Sets the global debug flag. Called once from `main` before any other work.
pub fn init(debug: bool) {
    DEBUG_ENABLED.store(debug, Ordering::Relaxed);
    if debug {
        log_debug!("debug logging enabled");
    }
}

/// Used by the `log_debug!` macro; `false` until `init` runs.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}
