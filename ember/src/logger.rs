//! The serializing core of the logging framework.
//!
//! Any number of threads may call [`Logger::write`] at once; one mutex
//! around formatting and emission keeps lines whole and in order. Records
//! above the current threshold are rejected before the lock is taken.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use chrono::Local;

use crate::errors::EmberError;
use crate::level::default_level;
use crate::sink::LogSink;
use crate::time::stamp_at;

/// Process-local ordinal of the calling thread, used as the thread column
/// in record lines. Ordinals are handed out in first-call order.
pub fn thread_ordinal() -> u32 {
    static NEXT: AtomicU32 = AtomicU32::new(1);
    thread_local! {
        static ORDINAL: u32 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    ORDINAL.with(|ordinal| *ordinal)
}

pub struct Logger {
    level: AtomicI32,
    inner: Mutex<Inner>,
    last_error: Mutex<Option<EmberError>>,
}

struct Inner {
    sink: Box<dyn LogSink>,
    last_bucket: i64,
}

impl Logger {
    pub fn new(sink: Box<dyn LogSink>) -> Logger {
        Logger {
            level: AtomicI32::new(default_level()),
            inner: Mutex::new(Inner {
                sink,
                last_bucket: 0,
            }),
            last_error: Mutex::new(None),
        }
    }

    pub fn set_level(&self, level: i32) {
        self.level.store(level, Ordering::Relaxed);
    }

    pub fn level(&self) -> i32 {
        self.level.load(Ordering::Relaxed)
    }

    /// Emit one record. Returns without locking or formatting when `level`
    /// is above the threshold.
    ///
    /// The threshold is read relaxed, without the write lock: a concurrent
    /// `set_level` may be seen one message late on another thread. That
    /// staleness window is deliberate; taking the lock here would put the
    /// cost on every filtered-out message.
    pub fn write(&self, level: i32, tag: &str, message: &str) {
        if level > self.level.load(Ordering::Relaxed) {
            return;
        }

        // A writer that panicked mid-append must not take logging down for
        // the rest of the process.
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let now = Local::now();
        let bucket = now.timestamp();
        if bucket != inner.last_bucket {
            let header = format!("{}\r\n", stamp_at(now));
            if let Err(e) = inner.sink.append(&header) {
                self.note_error(e);
            }
            inner.last_bucket = bucket;
        }

        let line = format!("{:<12} {:>4} {}\r\n", tag, thread_ordinal(), message);
        if let Err(e) = inner.sink.append(&line) {
            self.note_error(e);
        }
    }

    /// Last sink failure, if any. Sink errors never propagate out of
    /// [`Logger::write`]; this is the only place they surface.
    pub fn take_last_error(&self) -> Option<EmberError> {
        match self.last_error.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    fn note_error(&self, err: EmberError) {
        if let Ok(mut slot) = self.last_error.lock() {
            *slot = Some(err);
        }
    }
}
