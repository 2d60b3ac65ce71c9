//! Service object for the hardware JPEG codec device node.
//!
//! The codec accelerator is unrelated to logo decoding; it lives alongside the
//! loader on the same boards. This crate replaces the process-wide device, class
//! and device-number globals of a character-device driver with an explicit
//! [`CodecDevice`] value:
//!
//! - [`CodecDevice::probe`] constructs it once at startup
//! - [`CodecDevice::open`] hands out reference-counted [`CodecHandle`]s
//! - [`CodecHandle::ioctl`] forwards opaque commands to the [`CodecBackend`]
//! - dropping the device (or [`CodecDevice::remove`]) shuts the backend down
//!
//! # Example
//!
//! ```
//! use rle565_device::{CodecBackend, CodecDevice, DeviceError};
//!
//! struct Loopback;
//!
//! impl CodecBackend for Loopback {
//!     fn open(&mut self, _open_count: u32) -> Result<(), DeviceError> { Ok(()) }
//!     fn release(&mut self, _open_count: u32) -> Result<(), DeviceError> { Ok(()) }
//!     fn ioctl(&mut self, _cmd: u32, arg: u64) -> Result<i64, DeviceError> { Ok(arg as i64) }
//! }
//!
//! let device = CodecDevice::probe(Loopback, "gemini").unwrap();
//! let handle = device.open().unwrap();
//! assert_eq!(handle.ioctl(0x01, 7).unwrap(), 7);
//! assert_eq!(device.open_count(), 1);
//! drop(handle);
//! assert_eq!(device.open_count(), 0);
//! ```

pub mod errors;
pub mod service;

pub use errors::DeviceError;
pub use service::{ioctl_nr, CodecBackend, CodecDevice, CodecHandle};
