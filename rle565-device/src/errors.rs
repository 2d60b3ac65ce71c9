//! Error types for the codec device service.

use rle565_common::errno;
use thiserror::Error;

/// Errors reported by [`CodecDevice`](crate::CodecDevice) and its backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Backend initialization failed during probe.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Invalid device name or argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend refused another open.
    #[error("Device busy (open count {0})")]
    Busy(u32),

    /// The backend does not understand the ioctl command.
    #[error("Unsupported ioctl command {0:#x}")]
    UnsupportedCommand(u32),

    /// Backend-specific failure carrying an errno value.
    #[error("Backend error: errno {0}")]
    Backend(i32),
}

impl DeviceError {
    /// Returns the negative status code for this error.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::InitFailed(_) => -errno::ENODEV,
            Self::InvalidArgument(_) => -errno::EINVAL,
            Self::Busy(_) => -errno::EBUSY,
            Self::UnsupportedCommand(_) => -errno::ENOTTY,
            Self::Backend(code) => code.checked_abs().map_or(i32::MIN, |c| -c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(DeviceError::Busy(1).errno(), -16);
        assert_eq!(DeviceError::UnsupportedCommand(7).errno(), -25);
        assert_eq!(DeviceError::InitFailed("clk".into()).errno(), -19);
        assert_eq!(DeviceError::Backend(5).errno(), -5);
        assert_eq!(DeviceError::Backend(-5).errno(), -5);
    }

    #[test]
    fn test_backend_errno_extremes() {
        assert_eq!(DeviceError::Backend(i32::MIN).errno(), i32::MIN);
        assert_eq!(DeviceError::Backend(i32::MAX).errno(), -i32::MAX);
        assert_eq!(DeviceError::Backend(0).errno(), 0);
    }

    #[test]
    fn test_error_display() {
        let err = DeviceError::UnsupportedCommand(0x4004_6701);
        assert_eq!(err.to_string(), "Unsupported ioctl command 0x40046701");
    }
}
