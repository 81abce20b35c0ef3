//! Append-only text sinks.
//!
//! Transcripts and run logs are human-readable text appended one entry at a
//! time. A sink writes exactly the bytes it is given; entry layout and
//! delimiter lines belong to the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Width of the `=` delimiter line after each file entry.
pub const FILE_DELIMITER_WIDTH: usize = 60;

/// Width of the `=` delimiter line before each console entry.
pub const CONSOLE_DELIMITER_WIDTH: usize = 40;

/// A line of `width` `=` characters.
#[must_use]
pub fn delimiter(width: usize) -> String {
    "=".repeat(width)
}

/// Destination for append-only text entries.
pub trait EntrySink {
    /// Append one entry.
    ///
    /// # Errors
    /// Returns an error if the underlying write fails.
    fn append(&mut self, entry: &str) -> Result<()>;
}

impl<S: EntrySink + ?Sized> EntrySink for &mut S {
    fn append(&mut self, entry: &str) -> Result<()> {
        (**self).append(entry)
    }
}

impl<S: EntrySink + ?Sized> EntrySink for Box<S> {
    fn append(&mut self, entry: &str) -> Result<()> {
        (**self).append(entry)
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// Appends entries to a file, opening it for each write.
///
/// The file is created on first write.
#[derive(Debug, Clone)]
pub struct AppendFileSink {
    path: PathBuf,
}

impl AppendFileSink {
    /// Create a sink appending to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being appended to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntrySink for AppendFileSink {
    fn append(&mut self, entry: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Writes entries to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl EntrySink for ConsoleSink {
    fn append(&mut self, entry: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(entry.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// Keeps entries in memory. Used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Entries in the order they were appended.
    pub entries: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries joined, as a file sink would have written them.
    #[must_use]
    pub fn contents(&self) -> String {
        self.entries.concat()
    }
}

impl EntrySink for MemorySink {
    fn append(&mut self, entry: &str) -> Result<()> {
        self.entries.push(entry.to_owned());
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EntrySink for NullSink {
    fn append(&mut self, _entry: &str) -> Result<()> {
        Ok(())
    }
}
