use std::fmt;

use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::sink::ReportSink;
use crate::source::ByteSource;

/// Which input ran out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// A position where the two inputs disagree. `position` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MismatchRecord {
    pub position: u64,
    pub a: u8,
    pub b: u8,
}

impl fmt::Display for MismatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos: {}, f1: {:02x}, f2: {:02x}", self.position, self.a, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub file_a: String,
    pub file_b: String,
    pub bytes_read_a: u64,
    pub bytes_read_b: u64,
    pub total_len_a: u64,
    pub total_len_b: u64,
    pub mismatches: u64,
    pub exhausted: Side,
    /// Bytes left unread in the side that did *not* run out, when its count
    /// differs from its recorded length. Negative if the file grew after it
    /// was opened.
    pub unread_remainder: Option<i64>,
}

impl ComparisonResult {
    fn finalize<A, B>(a: &A, b: &B, tally: Tally, exhausted: Side) -> Self
    where
        A: ByteSource + ?Sized,
        B: ByteSource + ?Sized,
    {
        // Each branch only checks the side that is still open.
        let unread_remainder = match exhausted {
            Side::A => remainder(b.total_len(), tally.count_b),
            Side::B => remainder(a.total_len(), tally.count_a),
        };

        Self {
            file_a: a.name().to_owned(),
            file_b: b.name().to_owned(),
            bytes_read_a: tally.count_a,
            bytes_read_b: tally.count_b,
            total_len_a: a.total_len(),
            total_len_b: b.total_len(),
            mismatches: tally.mismatches,
            exhausted,
            unread_remainder,
        }
    }

    /// True when both inputs were read to the end without a single mismatch.
    pub fn is_identical(&self) -> bool {
        self.mismatches == 0 && self.exhausted == Side::A && self.unread_remainder.is_none()
    }

    /// Console summary, in the order it is logged.
    pub fn summary_lines(&self) -> Vec<String> {
        let (done, other) = match self.exhausted {
            Side::A => (&self.file_a, &self.file_b),
            Side::B => (&self.file_b, &self.file_a),
        };

        let mut lines = vec![
            format!("Read all of {}", done),
            format!("Read {} bytes of {}", self.bytes_read_a, self.file_a),
            format!("Read {} bytes of {}", self.bytes_read_b, self.file_b),
        ];
        if let Some(left) = self.unread_remainder {
            lines.push(format!("{} bytes still remaining to be read for {}", left, other));
        }
        lines.push(format!("Total number of mismatches: {}", self.mismatches));
        lines
    }
}

fn remainder(total: u64, count: u64) -> Option<i64> {
    (count != total).then(|| total as i64 - count as i64)
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count_a: u64,
    count_b: u64,
    mismatches: u64,
}

/// Streams two sources in lockstep and reports every differing byte to the
/// attached sinks.
#[derive(Default)]
pub struct Comparator<'s> {
    sinks: Vec<Box<dyn ReportSink + 's>>,
}

impl<'s> Comparator<'s> {
    pub fn new(sinks: Vec<Box<dyn ReportSink + 's>>) -> Self {
        Self { sinks }
    }

    pub fn with_sink(mut self, sink: impl ReportSink + 's) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Runs one full pass. End-of-stream on either side ends the run
    /// normally; any other read error aborts it without a summary.
    pub fn compare<A, B>(&mut self, a: &mut A, b: &mut B) -> Result<ComparisonResult>
    where
        A: ByteSource + ?Sized,
        B: ByteSource + ?Sized,
    {
        let mut tally = Tally::default();

        let exhausted = loop {
            let byte_a = match read(a)? {
                Some(byte) => byte,
                None => break Side::A,
            };
            tally.count_a += 1;

            // A's byte is left uncompared if B has nothing to pair it with.
            let byte_b = match read(b)? {
                Some(byte) => byte,
                None => break Side::B,
            };
            tally.count_b += 1;

            debug_assert_eq!(tally.count_a, tally.count_b, "sources out of lockstep");
            log::trace!("pos {}: {:02x} {:02x}", tally.count_a, byte_a, byte_b);

            if byte_a != byte_b {
                tally.mismatches += 1;
                self.emit(&MismatchRecord {
                    position: tally.count_a,
                    a: byte_a,
                    b: byte_b,
                })?;
            }
        };

        let result = ComparisonResult::finalize(&*a, &*b, tally, exhausted);
        for line in result.summary_lines() {
            log::info!("{}", line);
        }
        Ok(result)
    }

    /// Flushes every sink.
    pub fn finish(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.finish().map_err(|source| CompareError::Write {
                name: sink.name().to_owned(),
                source,
            })?;
        }
        Ok(())
    }

    fn emit(&mut self, record: &MismatchRecord) -> Result<()> {
        let line = record.to_string();
        for sink in &mut self.sinks {
            sink.write_line(&line).map_err(|source| CompareError::Write {
                name: sink.name().to_owned(),
                source,
            })?;
        }
        Ok(())
    }
}

fn read<S: ByteSource + ?Sized>(src: &mut S) -> Result<Option<u8>> {
    src.next_byte().map_err(|source| CompareError::Read {
        name: src.name().to_owned(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests for the lockstep comparison and its summary rules.
// ─────────────────────────────────────────────────────────────────────────────
