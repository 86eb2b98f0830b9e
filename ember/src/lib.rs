//! Ember is a small file-first logging framework: a serializing [`logger::Logger`]
//! core in front of a pluggable [`sink::LogSink`], with tag-bound
//! [`writer::LogWriter`] handles for call sites.
//!
//! Logging is split across two levels of object. The lower level
//! ([`logger::Logger`] plus a sink) owns formatting, level filtering and the
//! write lock; the higher level ([`writer::LogWriter`]) is what subsystems
//! hold, each with its own short tag so one source can be filtered out of a
//! shared log quickly. Levels apply to the lower object because they are a
//! whole-process concern.

pub mod errors;
pub mod level;
pub mod logger;
pub mod rollover;
pub mod sink;
pub mod time;
pub mod writer;
