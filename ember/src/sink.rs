//! Log destinations.
//!
//! A [`LogSink`] takes fully formatted lines and persists them somewhere.
//! [`FileSink`] is the real one; [`NullSink`] swallows everything, which is
//! handy for muting a subsystem wholesale or for tests.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::EmberError;
use crate::rollover::rollover;
use crate::time::wall_stamp;

pub trait LogSink: Send {
    /// Append one formatted line (terminator included) to the destination.
    fn append(&mut self, line: &str) -> Result<(), EmberError>;
}

/// A sink that discards every line.
pub struct NullSink;

impl LogSink for NullSink {
    fn append(&mut self, _line: &str) -> Result<(), EmberError> {
        Ok(())
    }
}

/// Appends UTF-16LE text to a log file, flushing after every line.
///
/// The file is opened in append mode with a BOM written first when the file
/// is fresh. A `BEGIN SESSION` marker goes out right after opening and a
/// matching `END SESSION` marker on drop, so sessions can be told apart in
/// a long-lived log.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Open `path` for appending. With `roll` set and a file already present
    /// at `path`, the existing chain is shifted up and the old log becomes
    /// `<stem>_1<ext>` before the fresh file is created.
    pub fn open(path: &Path, roll: bool) -> Result<FileSink, EmberError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if roll && path.exists() {
            rollover(path)?;
        }

        let fresh = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        if fresh {
            // UTF-16LE byte order mark
            file.write_all(&[0xFF, 0xFE])?;
        }

        let mut sink = FileSink {
            path: path.to_path_buf(),
            file: Some(file),
        };
        sink.append(&format!("{} ######## BEGIN SESSION ########\r\n", wall_stamp()))?;
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&mut self, line: &str) -> Result<(), EmberError> {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Ok(()),
        };

        let mut bytes = Vec::with_capacity(line.len() * 2);
        for unit in line.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.append(&format!("{} ######## END SESSION ########\r\n", wall_stamp()));
        self.file.take();
    }
}
