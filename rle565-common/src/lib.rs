//! Common types shared across the RLE565 boot-logo crates.
//!
//! This crate provides:
//! - [`Size`] - surface dimensions in pixels
//! - [`errno`] - the negative status codes reported by the loader entry point

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Get the number of pixels (width * height).
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Errno values used for status codes.
///
/// Status codes are the negated values, e.g. a missing file reports `-ENOENT`.
pub mod errno {
    /// No such file or directory.
    pub const ENOENT: i32 = 2;
    /// I/O error.
    pub const EIO: i32 = 5;
    /// Out of memory.
    pub const ENOMEM: i32 = 12;
    /// Bad address.
    pub const EFAULT: i32 = 14;
    /// Device or resource busy.
    pub const EBUSY: i32 = 16;
    /// No such device.
    pub const ENODEV: i32 = 19;
    /// Invalid argument.
    pub const EINVAL: i32 = 22;
    /// Inappropriate ioctl for device.
    pub const ENOTTY: i32 = 25;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        let s = Size::new(320, 480);
        assert_eq!(s.width, 320);
        assert_eq!(s.height, 480);
        assert_eq!(s.area(), 153_600);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_area_does_not_overflow() {
        let s = Size::new(u32::MAX, u32::MAX);
        assert_eq!(s.area(), u32::MAX as u64 * u32::MAX as u64);
    }

    #[test]
    fn test_empty() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, 0).is_empty());
    }

    #[test]
    fn test_errno_values() {
        assert_eq!(errno::ENOENT, 2);
        assert_eq!(errno::EIO, 5);
        assert_eq!(errno::ENOMEM, 12);
        assert_eq!(errno::ENODEV, 19);
    }
}
