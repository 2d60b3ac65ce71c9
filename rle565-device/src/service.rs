//! Codec device service object.
//!
//! [`CodecDevice`] owns one hardware codec backend for its whole lifetime: it is
//! probed once at startup and torn down when dropped. Clients open it to get a
//! [`CodecHandle`], issue opaque `ioctl` commands through the handle, and release
//! it (explicitly or by dropping it). The device keeps a count of open handles.
//!
//! Handles borrow the device, so a device cannot be removed while any handle is
//! still open.

use crate::DeviceError;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

/// Hardware-specific half of a codec device.
///
/// Hooks run with the device lock held, so they never race each other.
pub trait CodecBackend: Send {
    /// Brings the hardware up during probe.
    fn init(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    /// Called before a new handle is handed out. `open_count` is the number of
    /// handles already open; returning an error refuses the open.
    fn open(&mut self, open_count: u32) -> Result<(), DeviceError>;

    /// Called when a handle is released. `open_count` is the number of handles
    /// still open afterwards.
    fn release(&mut self, open_count: u32) -> Result<(), DeviceError>;

    /// Dispatches an opaque command.
    fn ioctl(&mut self, cmd: u32, arg: u64) -> Result<i64, DeviceError>;

    /// Shuts the hardware down when the device is removed.
    fn exit(&mut self) {}
}

struct DeviceState<B> {
    backend: B,
    open_count: u32,
}

/// A probed codec device.
pub struct CodecDevice<B: CodecBackend> {
    node_name: String,
    state: Mutex<DeviceState<B>>,
}

/// Returns the ioctl command number (the low 8 bits, like `_IOC_NR`).
pub const fn ioctl_nr(cmd: u32) -> u32 {
    cmd & 0xFF
}

impl<B: CodecBackend> CodecDevice<B> {
    /// Initializes `backend` and registers it under the node name `"{name}0"`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidArgument`] for an empty name, or whatever the
    /// backend's `init` hook reports.
    pub fn probe(mut backend: B, name: &str) -> Result<Self, DeviceError> {
        if name.is_empty() {
            return Err(DeviceError::InvalidArgument(
                "Device name cannot be empty".to_string(),
            ));
        }

        if let Err(e) = backend.init() {
            error!("{}: initialization failed: {}", name, e);
            return Err(e);
        }

        let node_name = format!("{}0", name);
        info!("{}: codec device registered", node_name);

        Ok(Self {
            node_name,
            state: Mutex::new(DeviceState {
                backend,
                open_count: 0,
            }),
        })
    }

    /// Returns the device node name.
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    /// Returns the number of currently open handles.
    pub fn open_count(&self) -> u32 {
        self.state.lock().open_count
    }

    /// Opens the device.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it refuses the open; the open count is left
    /// unchanged in that case.
    pub fn open(&self) -> Result<CodecHandle<'_, B>, DeviceError> {
        let mut state = self.state.lock();
        let current = state.open_count;
        state.backend.open(current)?;
        state.open_count = current + 1;

        debug!("{} open_count = {}", self.node_name, state.open_count);

        Ok(CodecHandle {
            device: self,
            released: false,
        })
    }

    /// Removes the device, shutting the backend down.
    pub fn remove(self) {
        drop(self);
    }

    fn release_one(&self) -> Result<(), DeviceError> {
        let mut state = self.state.lock();
        state.open_count = state.open_count.saturating_sub(1);
        let remaining = state.open_count;
        let result = state.backend.release(remaining);

        debug!("{} open_count = {}", self.node_name, remaining);
        result
    }

    fn dispatch(&self, cmd: u32, arg: u64) -> Result<i64, DeviceError> {
        debug!("{}: ioctl cmd = {}", self.node_name, ioctl_nr(cmd));
        self.state.lock().backend.ioctl(cmd, arg)
    }
}

impl<B: CodecBackend> Drop for CodecDevice<B> {
    fn drop(&mut self) {
        self.state.get_mut().backend.exit();
        info!("{}: codec device removed", self.node_name);
    }
}

impl<B: CodecBackend> std::fmt::Debug for CodecDevice<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecDevice")
            .field("node_name", &self.node_name)
            .field("open_count", &self.open_count())
            .finish()
    }
}

/// An open handle on a [`CodecDevice`].
///
/// Dropping the handle releases it; use [`release()`](Self::release) to observe
/// the backend's result.
pub struct CodecHandle<'d, B: CodecBackend> {
    device: &'d CodecDevice<B>,
    released: bool,
}

impl<B: CodecBackend> CodecHandle<'_, B> {
    /// Sends an opaque command to the backend.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend reports for `cmd`.
    pub fn ioctl(&self, cmd: u32, arg: u64) -> Result<i64, DeviceError> {
        self.device.dispatch(cmd, arg)
    }

    /// Releases the handle.
    ///
    /// # Errors
    ///
    /// Returns the backend's release error. The handle counts as released either
    /// way.
    pub fn release(mut self) -> Result<(), DeviceError> {
        self.released = true;
        self.device.release_one()
    }
}

impl<B: CodecBackend> std::fmt::Debug for CodecHandle<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecHandle")
            .field("node_name", &self.device.node_name)
            .field("released", &self.released)
            .finish()
    }
}

impl<B: CodecBackend> Drop for CodecHandle<'_, B> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.device.release_one() {
                warn!("{}: release failed: {}", self.device.node_name, e);
            }
        }
    }
}
