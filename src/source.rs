use std::fs::File;
use std::io::{self, BufReader, Cursor, ErrorKind, Read};
use std::path::Path;

use byteorder::ReadBytesExt;

use crate::error::{CompareError, Result};

/// A finite, sequentially readable byte stream with a known total length.
pub trait ByteSource {
    /// Next byte, or `None` once the stream is exhausted.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;

    /// Bytes handed out so far.
    fn consumed(&self) -> u64;

    /// Length the stream was expected to have when it was opened.
    fn total_len(&self) -> u64;

    /// Name used in log lines and error messages (usually the path).
    fn name(&self) -> &str;
}

pub struct StreamSource<R> {
    name: String,
    reader: R,
    total_len: u64,
    consumed: u64,
}

pub type FileSource = StreamSource<BufReader<File>>;

impl<R: Read> StreamSource<R> {
    pub fn new(name: impl Into<String>, reader: R, total_len: u64) -> Self {
        Self {
            name: name.into(),
            reader,
            total_len,
            consumed: 0,
        }
    }
}

impl FileSource {
    /// Opens `path` and records its size from the file metadata.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file: File = File::open(path).map_err(|source| CompareError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let len = file
            .metadata()
            .map_err(|source| CompareError::Stat {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        log::debug!("opened {} ({} bytes)", path.display(), len);

        Ok(Self::new(path.display().to_string(), BufReader::new(file), len))
    }
}

impl StreamSource<Cursor<Vec<u8>>> {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let len = bytes.len() as u64;
        Self::new(name, Cursor::new(bytes), len)
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.reader.read_u8() {
            Ok(byte) => {
                self.consumed += 1;
                Ok(Some(byte))
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn consumed(&self) -> u64 {
        self.consumed
    }

    fn total_len(&self) -> u64 {
        self.total_len
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests for file and in-memory byte sources.
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn file_source_reads_every_byte_then_ends() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(&[0x00, 0x7f, 0xff]).unwrap();
        f.flush().unwrap();

        let mut src = FileSource::open(f.path()).unwrap();
        assert_eq!(src.total_len(), 3);
        assert_eq!(src.name(), f.path().display().to_string());

        assert_eq!(src.next_byte().unwrap(), Some(0x00));
        assert_eq!(src.next_byte().unwrap(), Some(0x7f));
        assert_eq!(src.next_byte().unwrap(), Some(0xff));
        assert_eq!(src.next_byte().unwrap(), None);
        // stays exhausted
        assert_eq!(src.next_byte().unwrap(), None);
        assert_eq!(src.consumed(), 3);
    }

    #[test]
    fn open_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bin");

        let err = FileSource::open(&missing).err().expect("open should fail");
        match &err {
            CompareError::Open { path, .. } => assert_eq!(path, &missing),
            other => panic!("expected Open error, got {other:?}"),
        }
        assert!(err.to_string().contains("nope.bin"));
    }

    #[test]
    fn empty_source_is_immediately_exhausted() {
        let mut src = StreamSource::from_bytes("empty", Vec::new());
        assert_eq!(src.total_len(), 0);
        assert_eq!(src.next_byte().unwrap(), None);
        assert_eq!(src.consumed(), 0);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn non_eof_errors_are_passed_through() {
        let mut src = StreamSource::new("broken", Broken, 10);
        let err = src.next_byte().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(src.consumed(), 0);
    }
}
