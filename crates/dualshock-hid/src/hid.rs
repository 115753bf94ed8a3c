//! hidapi backend
//!
//! On Linux this uses the statically linked hidraw backend, so the user
//! needs read access to `/dev/hidraw*` (usually a udev rule).

use crate::transport::{DeviceError, HidBackend, HidHandle};
use crate::types::{DeviceIdentity, HidDeviceInfo};
use hidapi::{HidApi, HidDevice};

/// [`HidBackend`] over a process-wide hidapi context
pub struct HidApiBackend {
    api: HidApi,
}

impl HidApiBackend {
    /// Initialize hidapi
    pub fn new() -> Result<Self, DeviceError> {
        let api = HidApi::new().map_err(|e| DeviceError::BackendInit(e.to_string()))?;
        Ok(Self { api })
    }
}

impl HidBackend for HidApiBackend {
    type Device = HidApiDevice;

    fn enumerate(&mut self) -> Result<Vec<HidDeviceInfo>, DeviceError> {
        self.api
            .refresh_devices()
            .map_err(|e| DeviceError::Enumerate(e.to_string()))?;

        Ok(self
            .api
            .device_list()
            .map(|info| HidDeviceInfo {
                vendor_id: info.vendor_id(),
                product_id: info.product_id(),
                manufacturer: info.manufacturer_string().map(str::to_string),
                product: info.product_string().map(str::to_string),
                serial: info.serial_number().map(str::to_string),
                path: info.path().to_string_lossy().to_string(),
            })
            .collect())
    }

    fn open(&mut self, identity: DeviceIdentity) -> Result<Self::Device, DeviceError> {
        match self.api.open(identity.vendor_id, identity.product_id) {
            Ok(device) => Ok(HidApiDevice { device }),
            Err(e) => {
                // The device may have been plugged in since the last listing
                if let Err(refresh) = self.api.refresh_devices() {
                    log::debug!("HID: refresh after failed open: {}", refresh);
                }
                let attached = self
                    .api
                    .device_list()
                    .map(|info| DeviceIdentity::new(info.vendor_id(), info.product_id()));
                Err(open_failure(identity, e.to_string(), attached))
            }
        }
    }
}

/// hidapi reports "missing" and "refused" the same way; presence in the
/// current enumeration tells them apart.
fn open_failure(
    identity: DeviceIdentity,
    reason: String,
    mut attached: impl Iterator<Item = DeviceIdentity>,
) -> DeviceError {
    if attached.any(|id| id == identity) {
        DeviceError::OpenDenied { identity, reason }
    } else {
        DeviceError::DeviceNotFound { identity }
    }
}

/// An open hidapi device (closed on drop)
pub struct HidApiDevice {
    device: HidDevice,
}

impl HidHandle for HidApiDevice {
    fn set_nonblocking(&mut self) -> Result<(), DeviceError> {
        self.device
            .set_blocking_mode(false)
            .map_err(|e| DeviceError::NonBlockingConfigFailed(e.to_string()))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        self.device
            .read(buf)
            .map_err(|e| DeviceError::ReadError(e.to_string()))
    }

    fn manufacturer(&self) -> Result<Option<String>, DeviceError> {
        self.device
            .get_manufacturer_string()
            .map_err(|e| DeviceError::MetadataReadFailed {
                what: "manufacturer",
                reason: e.to_string(),
            })
    }

    fn product(&self) -> Result<Option<String>, DeviceError> {
        self.device
            .get_product_string()
            .map_err(|e| DeviceError::MetadataReadFailed {
                what: "product",
                reason: e.to_string(),
            })
    }
}
