//! Whole-document overwrite adapter for the league file.
//!
//! Seeking back to the start and writing is not enough on its own: when the
//! new document is shorter than the old one, the tail of the old document
//! stays on disk and the file no longer parses. [`Tape::write_document`]
//! always truncates before writing.

use std::{
    fs::File,
    io::{self, Cursor, Seek, SeekFrom, Write},
};

use thiserror::Error;

/// Failures raised while replacing the document behind a [`Tape`].
#[derive(Debug, Error)]
pub enum WriteError {
    /// The league could not be encoded as JSON.
    #[error("failed to encode league")]
    Encode(#[source] serde_json::Error),
    /// Repositioning to the start of the file failed.
    #[error("failed to seek to the start of the document")]
    Seek(#[source] io::Error),
    /// Discarding the previous content failed.
    #[error("failed to truncate the document")]
    Truncate(#[source] io::Error),
    /// The underlying handle rejected the write.
    #[error("failed to write the document")]
    Write(#[source] io::Error),
    /// The handle stopped accepting bytes before the document was complete.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite {
        /// Length of the full document.
        expected: usize,
        /// Bytes accepted before the handle stalled.
        written: usize,
    },
}

/// Handles whose content can be discarded in place.
pub trait Truncate {
    /// Drop every byte, leaving an empty handle.
    fn truncate(&mut self) -> io::Result<()>;
}

impl Truncate for File {
    fn truncate(&mut self) -> io::Result<()> {
        self.set_len(0)
    }
}

impl Truncate for Cursor<Vec<u8>> {
    fn truncate(&mut self) -> io::Result<()> {
        self.get_mut().clear();
        Ok(())
    }
}

/// Writer that replaces the full content of its handle on every call.
#[derive(Debug)]
pub struct Tape<F> {
    file: F,
}

impl<F> Tape<F>
where
    F: Write + Seek + Truncate,
{
    /// Wrap an open, writable handle.
    pub fn new(file: F) -> Self {
        Self { file }
    }

    /// Replace the handle content with exactly `bytes`.
    ///
    /// Returns the number of bytes written, which always equals
    /// `bytes.len()` on success.
    pub fn write_document(&mut self, bytes: &[u8]) -> Result<usize, WriteError> {
        self.file.seek(SeekFrom::Start(0)).map_err(WriteError::Seek)?;
        self.file.truncate().map_err(WriteError::Truncate)?;

        let mut written = 0;
        while written < bytes.len() {
            match self.file.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(WriteError::ShortWrite {
                        expected: bytes.len(),
                        written,
                    });
                }
                Ok(n) => written += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(WriteError::Write(err)),
            }
        }

        self.file.flush().map_err(WriteError::Write)?;
        Ok(written)
    }

    /// Borrow the wrapped handle.
    pub fn get_ref(&self) -> &F {
        &self.file
    }

    /// Unwrap the handle.
    pub fn into_inner(self) -> F {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use tempfile::tempfile;

    use super::*;

    fn read_back(file: &mut File) -> String {
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn overwrites_longer_content() {
        let mut file = tempfile().unwrap();
        file.write_all(b"12345").unwrap();

        let mut tape = Tape::new(file);
        assert_eq!(tape.write_document(b"abc").unwrap(), 3);

        let mut file = tape.into_inner();
        assert_eq!(read_back(&mut file), "abc");
    }

    #[test]
    fn longer_then_shorter_document_leaves_no_trailing_bytes() {
        let mut tape = Tape::new(tempfile().unwrap());
        tape.write_document(br#"[{"id":1,"name":"Chris","wins":33}]"#)
            .unwrap();
        tape.write_document(b"[]").unwrap();

        let mut file = tape.into_inner();
        assert_eq!(read_back(&mut file), "[]");
    }

    #[test]
    fn works_on_in_memory_cursor() {
        let mut tape = Tape::new(Cursor::new(b"old content".to_vec()));
        tape.write_document(b"new").unwrap();
        assert_eq!(tape.get_ref().get_ref().as_slice(), b"new");
    }

    struct StalledWriter {
        accept: usize,
        buf: Vec<u8>,
    }

    impl Write for StalledWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            let n = bytes.len().min(self.accept);
            self.accept -= n;
            self.buf.extend_from_slice(&bytes[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for StalledWriter {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    impl Truncate for StalledWriter {
        fn truncate(&mut self) -> io::Result<()> {
            self.buf.clear();
            Ok(())
        }
    }

    #[test]
    fn short_write_is_reported() {
        let mut tape = Tape::new(StalledWriter {
            accept: 2,
            buf: Vec::new(),
        });

        match tape.write_document(b"[1,2]") {
            Err(WriteError::ShortWrite { expected, written }) => {
                assert_eq!(expected, 5);
                assert_eq!(written, 2);
            }
            other => panic!("expected short write, got {other:?}"),
        }
    }

    struct BrokenSeek;

    impl Write for BrokenSeek {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for BrokenSeek {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::other("seek refused"))
        }
    }

    impl Truncate for BrokenSeek {
        fn truncate(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn seek_failure_is_surfaced() {
        let mut tape = Tape::new(BrokenSeek);
        assert!(matches!(
            tape.write_document(b"[]"),
            Err(WriteError::Seek(_))
        ));
    }

    struct ReadOnlyMedium {
        buf: Vec<u8>,
    }

    impl Write for ReadOnlyMedium {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for ReadOnlyMedium {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    impl Truncate for ReadOnlyMedium {
        fn truncate(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn truncate_failure_stops_before_writing() {
        let mut tape = Tape::new(ReadOnlyMedium {
            buf: b"old".to_vec(),
        });

        assert!(matches!(
            tape.write_document(b"[]"),
            Err(WriteError::Truncate(_))
        ));
        assert_eq!(tape.get_ref().buf, b"old");
    }
}
