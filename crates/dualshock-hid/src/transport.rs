//! HID transport seam
//!
//! The session and discovery only talk to these traits. [`crate::hid`]
//! implements them on top of hidapi; tests use a scripted backend.

use crate::types::{DeviceIdentity, HidDeviceInfo};

/// Error type for HID transport operations
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Failed to initialize HID backend: {0}")]
    BackendInit(String),

    #[error("Failed to enumerate HID devices: {0}")]
    Enumerate(String),

    #[error("No HID device found for {identity}")]
    DeviceNotFound { identity: DeviceIdentity },

    #[error("Failed to open device {identity}: {reason}")]
    OpenDenied {
        identity: DeviceIdentity,
        reason: String,
    },

    #[error("Couldn't set nonblocking mode on device: {0}")]
    NonBlockingConfigFailed(String),

    #[error("Couldn't read opened device's {what} string: {reason}")]
    MetadataReadFailed { what: &'static str, reason: String },

    #[error("Couldn't read from device: {0}")]
    ReadError(String),
}

/// Access to the host's HID stack
///
/// Creating the backend initializes the stack; dropping it shuts it down.
pub trait HidBackend {
    type Device: HidHandle;

    /// Snapshot every attached HID device
    fn enumerate(&mut self) -> Result<Vec<HidDeviceInfo>, DeviceError>;

    /// Open the first device matching `identity`
    fn open(&mut self, identity: DeviceIdentity) -> Result<Self::Device, DeviceError>;
}

/// An open device connection
///
/// Dropping the handle closes the device.
pub trait HidHandle {
    /// Make [`HidHandle::read`] return immediately when no report is queued
    fn set_nonblocking(&mut self) -> Result<(), DeviceError>;

    /// Read one report into `buf`, returning the byte count (0 = queue empty)
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError>;

    fn manufacturer(&self) -> Result<Option<String>, DeviceError>;

    fn product(&self) -> Result<Option<String>, DeviceError>;
}
