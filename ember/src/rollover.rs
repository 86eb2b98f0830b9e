//! Log file rollover.
//!
//! A log at `hearthd.log` rolls to `hearthd_1.log`; an existing
//! `hearthd_1.log` moves to `hearthd_2.log` first, and so on up the chain.
//! Indices are contiguous from 1, so the chain is walked from the highest
//! existing member downward and every rename lands on a free name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::EmberError;

/// Shift the whole `<stem>_<n><ext>` chain up one index, then move the file
/// at `path` to index 1. The caller is expected to have checked that `path`
/// exists.
pub fn rollover(path: &Path) -> Result<(), EmberError> {
    let chain = Chain::for_path(path)?;

    let mut top = 0;
    while chain.member(top + 1).exists() {
        top += 1;
    }

    // Highest first, so no rename ever hits a name still in use.
    for index in (1..=top).rev() {
        fs::rename(chain.member(index), chain.member(index + 1))?;
    }
    fs::rename(path, chain.member(1))?;

    Ok(())
}

struct Chain {
    dir: PathBuf,
    stem: String,
    ext: String,
}

impl Chain {
    fn for_path(path: &Path) -> Result<Chain, EmberError> {
        let stem = path
            .file_stem()
            .ok_or_else(|| EmberError::Custom(format!("no file name in {}", path.display())))?
            .to_string_lossy()
            .into_owned();
        let ext = match path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy()),
            None => String::new(),
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Chain { dir, stem, ext })
    }

    fn member(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{}_{}{}", self.stem, index, self.ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ember-rollover-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn first_rollover_creates_index_one() {
        let dir = scratch_dir("first");
        let active = dir.join("svc.log");
        fs::write(&active, "session A").unwrap();

        rollover(&active).unwrap();

        assert!(!active.exists());
        assert_eq!(fs::read_to_string(dir.join("svc_1.log")).unwrap(), "session A");
    }

    #[test]
    fn existing_chain_shifts_up_preserving_content() {
        let dir = scratch_dir("shift");
        let active = dir.join("svc.log");
        fs::write(&active, "session C").unwrap();
        fs::write(dir.join("svc_1.log"), "session B").unwrap();
        fs::write(dir.join("svc_2.log"), "session A").unwrap();

        rollover(&active).unwrap();

        assert!(!active.exists());
        assert_eq!(fs::read_to_string(dir.join("svc_1.log")).unwrap(), "session C");
        assert_eq!(fs::read_to_string(dir.join("svc_2.log")).unwrap(), "session B");
        assert_eq!(fs::read_to_string(dir.join("svc_3.log")).unwrap(), "session A");
        assert!(!dir.join("svc_4.log").exists());
    }

    #[test]
    fn extensionless_names_roll_too() {
        let dir = scratch_dir("noext");
        let active = dir.join("svclog");
        fs::write(&active, "x").unwrap();

        rollover(&active).unwrap();

        assert_eq!(fs::read_to_string(dir.join("svclog_1")).unwrap(), "x");
    }
}
