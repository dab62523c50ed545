//! Append-only pen log

use crate::record::TelemetryRecord;
use inkbridge_errors::TelemetryError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Persisted record of every telemetry entry, in arrival order.
///
/// An in-memory log keeps its text so it can be copied out (`contents`).
/// A log backed by a writer keeps nothing in memory unless
/// [`PenLog::with_memory_copy`] asks for it. `clear` empties the memory copy
/// for a new probe session; bytes already written to the backing writer are
/// never rewritten.
pub struct PenLog {
    contents: Option<String>,
    entries: usize,
    writer: Option<Box<dyn Write + Send>>,
}

impl PenLog {
    pub fn in_memory() -> Self {
        Self {
            contents: Some(String::new()),
            entries: 0,
            writer: None,
        }
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            contents: None,
            entries: 0,
            writer: Some(Box::new(writer)),
        }
    }

    /// Also keep the text in memory when backed by a writer.
    pub fn with_memory_copy(mut self) -> Self {
        self.contents.get_or_insert_with(String::new);
        self
    }

    /// Open `path` for appending, creating it when missing.
    pub fn open(path: &Path) -> Result<Self, TelemetryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(TelemetryError::LogWrite)?;
        Ok(Self::with_writer(file))
    }

    pub fn append(&mut self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        let entry = record.log_entry();
        if let Some(contents) = self.contents.as_mut() {
            contents.push_str(&entry);
        }
        self.entries = self.entries.saturating_add(1);
        if let Some(writer) = self.writer.as_mut() {
            writer
                .write_all(entry.as_bytes())
                .map_err(TelemetryError::LogWrite)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), TelemetryError> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush().map_err(TelemetryError::LogWrite),
            None => Ok(()),
        }
    }

    /// Empty when no memory copy is kept.
    pub fn contents(&self) -> &str {
        self.contents.as_deref().unwrap_or_default()
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn is_persisted(&self) -> bool {
        self.writer.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(contents) = self.contents.as_mut() {
            contents.clear();
        }
        self.entries = 0;
    }
}

impl Default for PenLog {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for PenLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PenLog")
            .field("entries", &self.entries)
            .field("persisted", &self.is_persisted())
            .finish()
    }
}
