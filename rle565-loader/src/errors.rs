//! Error types for the logo loader.

use rle565_common::errno;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a decode-and-blit call.
///
/// Every variant is terminal for the call; nothing is retried. Callers on the boot
/// path log the error and carry on without a logo.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No display surface has been registered.
    #[error("Can not access framebuffer: no display surface registered")]
    DeviceUnavailable,

    /// The image source could not be opened.
    #[error("Can not open {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the image source failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoFailure),

    /// The image buffer could not be allocated.
    #[error("Can not alloc {0} bytes of image data")]
    AllocationFailure(u64),

    /// The surface refused a write (the pixel budget normally prevents this).
    #[error("Surface error: {0:#}")]
    Surface(#[from] anyhow::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The ways reading an image source can fail.
#[derive(Debug, Error)]
pub enum IoFailure {
    /// The source has zero length.
    #[error("image source is empty")]
    EmptySource,

    /// Fewer bytes were read than the source length reported.
    #[error("short read: got {read} of {expected} bytes")]
    ShortRead { expected: usize, read: usize },

    /// Seek or read failed.
    #[error(transparent)]
    Os(#[from] io::Error),
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DeviceUnavailable,
    FileNotFound,
    IoError,
    AllocationFailure,
    SurfaceFault,
    InvalidConfig,
}

impl LoadError {
    /// Returns the error's classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DeviceUnavailable => ErrorKind::DeviceUnavailable,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::Io(_) => ErrorKind::IoError,
            Self::AllocationFailure(_) => ErrorKind::AllocationFailure,
            Self::Surface(_) => ErrorKind::SurfaceFault,
            Self::Config(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Returns the negative status code reported for this error.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self.kind() {
            ErrorKind::DeviceUnavailable => -errno::ENODEV,
            ErrorKind::FileNotFound => -errno::ENOENT,
            ErrorKind::IoError => -errno::EIO,
            ErrorKind::AllocationFailure => -errno::ENOMEM,
            ErrorKind::SurfaceFault => -errno::EFAULT,
            ErrorKind::InvalidConfig => -errno::EINVAL,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(IoFailure::Os(e))
    }
}

/// Maps a loader result to its status code: `0` on success, a negative errno
/// value otherwise.
#[must_use]
pub fn status_code<T>(result: &Result<T, LoadError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.errno(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(LoadError::DeviceUnavailable.errno(), -19);
        assert_eq!(
            LoadError::FileNotFound {
                path: PathBuf::from("/initlogo.rle"),
                source: io::Error::from(io::ErrorKind::NotFound),
            }
            .errno(),
            -2
        );
        assert_eq!(LoadError::Io(IoFailure::EmptySource).errno(), -5);
        assert_eq!(
            LoadError::Io(IoFailure::ShortRead {
                expected: 8,
                read: 4
            })
            .errno(),
            -5
        );
        assert_eq!(LoadError::AllocationFailure(1 << 40).errno(), -12);
        assert_eq!(LoadError::Surface(anyhow::anyhow!("full")).errno(), -14);
    }

    #[test]
    fn test_io_error_conversion() {
        let err: LoadError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code::<()>(&Ok(())), 0);
        assert_eq!(status_code::<()>(&Err(LoadError::DeviceUnavailable)), -19);
    }

    #[test]
    fn test_error_display() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("/initlogo.rle"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("Can not open /initlogo.rle"));

        let err = LoadError::Io(IoFailure::ShortRead {
            expected: 8,
            read: 4,
        });
        assert_eq!(err.to_string(), "I/O error: short read: got 4 of 8 bytes");
    }
}
