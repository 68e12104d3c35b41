//! The tweet queue file.
//!
//! The queue is a plain UTF-8 text file with one candidate tweet per line; the
//! first line is the next one to post. At rest the file always holds exactly
//! the lines that have not been consumed yet.

use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The first line of the queue and everything after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHead {
    /// The first line, stripped of surrounding whitespace.
    pub line: String,
    /// The bytes after the first newline, unchanged.
    pub tail: String,
}

/// Handle to a queue file on disk.
#[derive(Debug, Clone)]
pub struct TweetQueue {
    path: PathBuf,
}

impl TweetQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the queue file has no content at all.
    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(fs::metadata(&self.path)?.len() == 0)
    }

    /// Reads the head line and the remaining tail without modifying the file.
    pub fn read_head(&self) -> io::Result<QueueHead> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(split_head(&contents))
    }

    /// Replaces the queue contents with `tail`.
    ///
    /// The new contents are written to a temporary file in the same directory
    /// and renamed over the queue file, so readers never see a partial write.
    pub fn rewrite(&self, tail: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let permissions = fs::metadata(&self.path)?.permissions();

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(tail.as_bytes())?;
        temp.as_file().sync_all()?;
        fs::set_permissions(temp.path(), permissions)?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!(
            "Rewrote queue file {} with {} remaining bytes",
            self.path.display(),
            tail.len()
        );
        Ok(())
    }
}

/// Splits queue contents at the end of the first line.
///
/// A line ends at `\n`, `\r\n`, or a lone `\r`. The tail is returned
/// verbatim, including its own line endings.
pub fn split_head(contents: &str) -> QueueHead {
    let Some(end) = contents.find(['\n', '\r']) else {
        return QueueHead {
            line: contents.trim().to_string(),
            tail: String::new(),
        };
    };

    let rest = &contents[end..];
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .or_else(|| rest.strip_prefix('\r'))
        .unwrap_or(rest);

    QueueHead {
        line: contents[..end].trim().to_string(),
        tail: rest.to_string(),
    }
}
