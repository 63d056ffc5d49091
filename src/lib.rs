pub mod comparator;
pub mod config;
pub mod error;
pub mod sink;
pub mod source;

pub use comparator::{Comparator, ComparisonResult, MismatchRecord, Side};
pub use config::{run, CompareConfig};
pub use error::{CompareError, Result};
pub use sink::{ConsoleSink, FileSink, MemorySink, ReportSink, WriterSink};
pub use source::{ByteSource, FileSource, StreamSource};
