use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use combat_core::LogEntry;
use serde::Serialize;

use crate::api::{Result, RuntimeError};

/// Writes log entries as newline-delimited JSON.
pub struct JsonLinesSink {
    writer: Box<dyn Write + Send>,
    written: usize,
}

#[derive(Serialize)]
struct Record<'a> {
    encounter: u64,
    #[serde(flatten)]
    entry: &'a LogEntry,
}

impl JsonLinesSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            written: 0,
        }
    }

    /// Creates (or truncates) `path` and writes to it through a buffer.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(RuntimeError::Export)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn write_entry(&mut self, encounter: u64, entry: &LogEntry) -> Result<()> {
        let line = serde_json::to_string(&Record { encounter, entry })?;
        writeln!(self.writer, "{line}").map_err(RuntimeError::Export)?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(RuntimeError::Export)
    }

    /// Entries written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}
