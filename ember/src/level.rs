//! Severity levels.
//!
//! Levels are plain integers: a lower value means a more severe message.
//! The constants below are the conventional rungs, but callers are free to
//! invent intermediate values (say, 500 for something between warning and
//! info); the logger does not validate them.

pub const LOG_ERROR: i32 = 10;
pub const LOG_WARNING: i32 = 100;
pub const LOG_INFO: i32 = 1_000;
pub const LOG_DEBUG: i32 = 10_000;
pub const LOG_VERBOSE: i32 = 100_000;

/// Threshold a fresh [`crate::logger::Logger`] starts with.
/// Development builds get the chattier default.
pub fn default_level() -> i32 {
    if cfg!(debug_assertions) {
        LOG_DEBUG
    } else {
        LOG_WARNING
    }
}
