use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("f1 and f2 flags must be set")]
    MissingPaths,

    #[error("error opening {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("error getting stats for {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("error creating out file {}: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    /// Read failure other than end-of-stream.
    #[error("error reading byte for {name}: {source}")]
    Read { name: String, source: io::Error },

    #[error("error writing to {name}: {source}")]
    Write { name: String, source: io::Error },
}
