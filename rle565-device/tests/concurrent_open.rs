//! Open-count bookkeeping with handles opened from several threads.

use pretty_assertions::assert_eq;
use rle565_device::{ioctl_nr, CodecBackend, CodecDevice, DeviceError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Backend allowing up to `max_open` simultaneous handles.
struct Limited {
    max_open: u32,
    peak: Arc<AtomicU32>,
    exited: Arc<AtomicU32>,
}

impl CodecBackend for Limited {
    fn open(&mut self, open_count: u32) -> Result<(), DeviceError> {
        if open_count >= self.max_open {
            return Err(DeviceError::Busy(open_count));
        }
        self.peak.fetch_max(open_count + 1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&mut self, _open_count: u32) -> Result<(), DeviceError> {
        Ok(())
    }

    fn ioctl(&mut self, cmd: u32, arg: u64) -> Result<i64, DeviceError> {
        match ioctl_nr(cmd) {
            0x01 => Ok(arg as i64 * 2),
            _ => Err(DeviceError::UnsupportedCommand(cmd)),
        }
    }

    fn exit(&mut self) {
        self.exited.fetch_add(1, Ordering::SeqCst);
    }
}

fn limited(max_open: u32) -> (Limited, Arc<AtomicU32>, Arc<AtomicU32>) {
    let peak = Arc::new(AtomicU32::new(0));
    let exited = Arc::new(AtomicU32::new(0));
    (
        Limited {
            max_open,
            peak: peak.clone(),
            exited: exited.clone(),
        },
        peak,
        exited,
    )
}

#[test]
fn test_threads_share_device() {
    let (backend, peak, exited) = limited(u32::MAX);
    let device = CodecDevice::probe(backend, "gemini").unwrap();

    std::thread::scope(|s| {
        for i in 0..8u64 {
            let device = &device;
            s.spawn(move || {
                for _ in 0..50 {
                    let handle = device.open().unwrap();
                    assert_eq!(handle.ioctl(0x4004_6701, i).unwrap(), (i * 2) as i64);
                }
            });
        }
    });

    assert_eq!(device.open_count(), 0);
    assert!(peak.load(Ordering::SeqCst) >= 1);

    device.remove();
    assert_eq!(exited.load(Ordering::SeqCst), 1);
}

#[test]
fn test_refused_open_leaves_count() {
    let (backend, _peak, _exited) = limited(2);
    let device = CodecDevice::probe(backend, "gemini").unwrap();

    let a = device.open().unwrap();
    let b = device.open().unwrap();
    let err = device.open().unwrap_err();
    assert_eq!(err, DeviceError::Busy(2));
    assert_eq!(err.errno(), -16);
    assert_eq!(device.open_count(), 2);

    a.release().unwrap();
    let c = device.open().unwrap();
    assert_eq!(device.open_count(), 2);

    drop(b);
    drop(c);
    assert_eq!(device.open_count(), 0);
}

#[test]
fn test_unknown_command() {
    let (backend, _peak, _exited) = limited(1);
    let device = CodecDevice::probe(backend, "gemini").unwrap();
    let handle = device.open().unwrap();

    let err = handle.ioctl(0x4004_67FF, 0).unwrap_err();
    assert_eq!(err, DeviceError::UnsupportedCommand(0x4004_67FF));
    assert_eq!(err.errno(), -25);
}
