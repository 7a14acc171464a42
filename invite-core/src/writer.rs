//! Saving invites to disk and reading them back.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::constants::DEFAULT_INVITE_FILENAME;
use crate::error::InviteResult;

/// Where an invite should be written.
///
/// A relative `filename` is joined onto `dir`; without a `dir` it is resolved
/// against the current directory. Absolute filenames are used as-is.
/// Runs sharing the default filename overwrite each other's file.
#[derive(Debug, Clone, Default)]
pub struct InviteTarget {
    pub dir: Option<PathBuf>,
    pub filename: Option<PathBuf>,
}

impl InviteTarget {
    pub fn path(&self) -> PathBuf {
        let filename = self
            .filename
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INVITE_FILENAME));

        match &self.dir {
            Some(dir) if filename.is_relative() => dir.join(filename),
            _ => filename,
        }
    }
}

/// Write invite content to `path`, replacing any existing file.
///
/// Missing parent directories are not created. Returns the absolute path.
pub fn save_invite(content: &str, path: &Path) -> InviteResult<PathBuf> {
    let absolute = std::path::absolute(path)
        .and_then(|absolute| std::fs::write(&absolute, content).map(|_| absolute))
        .inspect_err(|e| error!(path = %path.display(), "Error saving .ics file: {e}"))?;

    info!(path = %absolute.display(), "Saved invite");
    Ok(absolute)
}

/// Read a saved invite back as raw bytes, for attaching.
pub fn read_invite(path: &Path) -> InviteResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .inspect_err(|e| error!(path = %path.display(), "Error reading .ics file: {e}"))?;
    Ok(bytes)
}
