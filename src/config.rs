use std::path::PathBuf;

use crate::comparator::{Comparator, ComparisonResult};
use crate::error::Result;
use crate::sink::{ConsoleSink, FileSink, ReportSink};
use crate::source::FileSource;

/// Everything one comparison run needs to know. Built by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    pub file_a: PathBuf,
    pub file_b: PathBuf,
    /// Also write mismatch lines to this file.
    pub output: Option<PathBuf>,
    /// Also write mismatch lines to the console.
    pub print_mismatches: bool,
    pub color: bool,
}

impl CompareConfig {
    pub fn new(file_a: impl Into<PathBuf>, file_b: impl Into<PathBuf>) -> Self {
        Self {
            file_a: file_a.into(),
            file_b: file_b.into(),
            output: None,
            print_mismatches: false,
            color: false,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn print_mismatches(mut self, enabled: bool) -> Self {
        self.print_mismatches = enabled;
        self
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    fn sinks(&self) -> Result<Vec<Box<dyn ReportSink>>> {
        let mut sinks: Vec<Box<dyn ReportSink>> = Vec::new();
        if self.print_mismatches {
            sinks.push(Box::new(ConsoleSink::new(self.color)));
        }
        if let Some(path) = &self.output {
            sinks.push(Box::new(FileSink::create(path)?));
        }
        Ok(sinks)
    }
}

/// Opens both inputs and the optional report file, then compares them.
///
/// Every resource is acquired before the first byte is read. The report
/// file is flushed on success and on the error path (via drop).
pub fn run(config: &CompareConfig) -> Result<ComparisonResult> {
    let sinks = config.sinks()?;

    let mut a = FileSource::open(&config.file_a)?;
    let mut b = FileSource::open(&config.file_b)?;

    let mut comparator = Comparator::new(sinks);
    let result = comparator.compare(&mut a, &mut b)?;
    comparator.finish()?;

    Ok(result)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests for running comparisons against files on disk.
// ─────────────────────────────────────────────────────────────────────────────
