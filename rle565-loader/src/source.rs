//! Scoped whole-file reads for image sources.
//!
//! A [`ByteSource`] resolves its length up front by seeking to the end, then reads
//! exactly that many bytes into a freshly allocated buffer. The underlying handle
//! is closed when the source is consumed or dropped, whichever path is taken.

use crate::errors::{IoFailure, LoadError};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// An opened image source with a known, non-zero length.
#[derive(Debug)]
pub struct ByteSource<R> {
    reader: R,
    len: usize,
}

impl ByteSource<File> {
    /// Opens the file at `path` read-only.
    ///
    /// # Errors
    ///
    /// - [`LoadError::FileNotFound`] if the file cannot be opened
    /// - [`LoadError::Io`] if it is empty or its length cannot be determined
    /// - [`LoadError::AllocationFailure`] if its length does not fit in memory
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ByteSource<R> {
    /// Wraps `reader`, resolving its length by seeking to the end.
    ///
    /// # Errors
    ///
    /// Returns [`IoFailure::EmptySource`] for a zero-length source.
    pub fn new(mut reader: R) -> Result<Self, LoadError> {
        let end = reader.seek(SeekFrom::End(0))?;
        if end == 0 {
            return Err(IoFailure::EmptySource.into());
        }
        let len = usize::try_from(end).map_err(|_| LoadError::AllocationFailure(end))?;
        reader.seek(SeekFrom::Start(0))?;

        Ok(Self { reader, len })
    }

    /// Returns the source length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: empty sources are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the whole source and closes it.
    ///
    /// # Errors
    ///
    /// - [`LoadError::AllocationFailure`] if the buffer cannot be allocated
    /// - [`IoFailure::ShortRead`] if the source ends before its reported length
    pub fn read_all(mut self) -> Result<Vec<u8>, LoadError> {
        let mut data = Vec::new();
        if data.try_reserve_exact(self.len).is_err() {
            return Err(LoadError::AllocationFailure(self.len as u64));
        }
        data.resize(self.len, 0);

        let mut filled = 0;
        while filled < self.len {
            match self.reader.read(&mut data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled != self.len {
            return Err(IoFailure::ShortRead {
                expected: self.len,
                read: filled,
            }
            .into());
        }
        Ok(data)
    }
}
