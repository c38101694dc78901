//! Last opened file persistence
//!
//! The session file is plain text holding a single path.

use crate::error::ExtractError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used when no explicit session path is given
pub const DEFAULT_SESSION_FILE: &str = "surfview-session.txt";

/// Remembers the most recently opened dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    path: PathBuf,
}

impl Session {
    /// Use the session file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Session file in the current working directory
    pub fn default_location() -> Self {
        Self::new(DEFAULT_SESSION_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the remembered path. A missing or empty session file yields `None`.
    pub fn last_opened(&self) -> Result<Option<PathBuf>, ExtractError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let last = contents.lines().next().map(str::trim).unwrap_or_default();
        if last.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(last)))
        }
    }

    /// Store `opened` as the last opened file, replacing any previous entry
    pub fn remember<P: AsRef<Path>>(&self, opened: P) -> Result<(), ExtractError> {
        let opened = opened.as_ref();
        debug!("Remembering {} in {}", opened.display(), self.path.display());
        fs::write(&self.path, format!("{}\n", opened.display()))?;
        Ok(())
    }

    /// Forget the remembered file
    pub fn clear(&self) -> Result<(), ExtractError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::default_location()
    }
}
