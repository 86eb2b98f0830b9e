//! Per-subsystem logging facade.
//!
//! A [`LogWriter`] binds a short tag and a shared [`Logger`] so call sites
//! don't repeat routing boilerplate. There are two write paths: the plain
//! [`LogWriter::write`], and [`LogWriter::stream`], which accumulates
//! appended text and flushes it as a single record when it goes out of
//! scope. The stream path can't suffer mismatched format arguments, at the
//! cost of an allocation and a deferred flush per message, so it is the
//! wrong choice for latency-critical call sites.

use std::fmt;
use std::sync::Arc;

use crate::logger::Logger;

/// Tags longer than this are clamped at construction.
pub const MAX_TAG_LEN: usize = 12;

/// Rendered messages are cut at this many characters, never rejected.
pub const MAX_MESSAGE_LEN: usize = 4096;

pub struct LogWriter {
    tag: String,
    logger: Arc<Logger>,
}

impl LogWriter {
    pub fn new(tag: &str, logger: Arc<Logger>) -> LogWriter {
        let tag = match tag.char_indices().nth(MAX_TAG_LEN) {
            Some((cut, _)) => tag[..cut].to_string(),
            None => tag.to_string(),
        };
        LogWriter { tag, logger }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Emit `message` under this writer's tag, truncated to
    /// [`MAX_MESSAGE_LEN`] characters on a character boundary.
    pub fn write(&self, level: i32, message: &str) {
        let message = match message.char_indices().nth(MAX_MESSAGE_LEN) {
            Some((cut, _)) => &message[..cut],
            None => message,
        };
        self.logger.write(level, &self.tag, message);
    }

    /// Start a scoped accumulator. Everything appended before the stream
    /// drops is flushed as exactly one record.
    pub fn stream(&self, level: i32) -> LogStream<'_> {
        LogStream {
            writer: self,
            level,
            buf: String::new(),
        }
    }
}

/// Write-once accumulator returned by [`LogWriter::stream`].
///
/// Implements [`fmt::Write`], so `write!(stream, ...)` works; [`LogStream::append`]
/// covers the common case of chaining displayable values. The single flush
/// happens on drop, on every exit path.
pub struct LogStream<'a> {
    writer: &'a LogWriter,
    level: i32,
    buf: String,
}

impl LogStream<'_> {
    pub fn append(&mut self, value: impl fmt::Display) -> &mut Self {
        use fmt::Write;
        let _ = write!(self.buf, "{}", value);
        self
    }
}

impl fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        self.writer.write(self.level, &self.buf);
    }
}
