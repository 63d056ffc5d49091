use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use owo_colors::OwoColorize;

use crate::error::{CompareError, Result};

/// Destination for formatted mismatch lines.
pub trait ReportSink {
    /// Writes one line. `line` carries no trailing newline.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Flushes anything buffered. Called once when a run completes.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Routes lines through the `log` facade at info level.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl ReportSink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.color {
            log::info!("{}", line.yellow());
        } else {
            log::info!("{}", line);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Buffered line writer. Anything left in the buffer is flushed on drop,
/// so an aborted run still leaves the lines written so far on disk.
pub struct WriterSink<W: Write> {
    name: String,
    writer: BufWriter<W>,
}

pub type FileSink = WriterSink<File>;

impl<W: Write> WriterSink<W> {
    pub fn new(name: impl Into<String>, inner: W) -> Self {
        Self {
            name: name.into(),
            writer: BufWriter::new(inner),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl FileSink {
    /// Creates (or truncates) the report file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file: File = File::create(path).map_err(|source| CompareError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), file))
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ReportSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests for the sink implementations.
// ─────────────────────────────────────────────────────────────────────────────
