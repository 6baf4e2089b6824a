//! Process-wide leveled logging.
//!
//! Weft logs through a single global [`Logger`]: callers format a message
//! with level, timestamp, source file and line, and push it onto a queue; a
//! background drain thread batches queued lines to standard output so hot
//! paths never block on the terminal.
//!
//! Use the `log_*` macros rather than calling [`Logger::log`] directly:
//! they capture the call site and skip argument formatting entirely when
//! the level is below the threshold:
//!
//! ```
//! use weft_core::{log_info, log_warn};
//!
//! log_info!("graph '{}' finished in {} ms", "pipeline", 12);
//! log_warn!("node '{}' has no outputs", "sink");
//! ```

mod level;
mod logger;

pub use level::LogLevel;
pub use logger::Logger;

/// Log at [`LogLevel::Debug`].
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::Logger::global().log(
            $crate::logging::LogLevel::Debug,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}

/// Log at [`LogLevel::Info`].
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::Logger::global().log(
            $crate::logging::LogLevel::Info,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}

/// Log at [`LogLevel::Warn`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::Logger::global().log(
            $crate::logging::LogLevel::Warn,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}

/// Log at [`LogLevel::Error`].
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::Logger::global().log(
            $crate::logging::LogLevel::Error,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}
