//! Scripted HID backend for tests

use crate::transport::{DeviceError, HidBackend, HidHandle};
use crate::types::{DeviceIdentity, HidDeviceInfo};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// One scripted result of [`HidHandle::read`]
#[derive(Debug, Clone)]
pub enum ReadStep {
    Report(Vec<u8>),
    Empty,
    Error,
}

/// Shared view into what the backend and its devices did
#[derive(Default)]
pub struct MockState {
    /// Every identity passed to `open`, in order
    pub opened: RefCell<Vec<DeviceIdentity>>,
    /// Handles currently alive
    pub live: Cell<usize>,
    /// Reads performed across all handles
    pub reads: Cell<usize>,
    /// Calls to `enumerate`
    pub enumerations: Cell<usize>,
    /// Remaining scripted reads; an exhausted script reads as empty
    pub script: RefCell<VecDeque<ReadStep>>,
}

impl MockState {
    pub fn push(&self, step: ReadStep) {
        self.script.borrow_mut().push_back(step);
    }

    pub fn push_report(&self, report: Vec<u8>) {
        self.push(ReadStep::Report(report));
    }
}

pub struct MockBackend {
    pub devices: Vec<HidDeviceInfo>,
    /// Identities that are present but refuse to open
    pub denied: Vec<DeviceIdentity>,
    pub fail_nonblocking: bool,
    pub fail_metadata: bool,
    /// Only the product string fails
    pub fail_product: bool,
    pub state: Rc<MockState>,
}

impl MockBackend {
    pub fn new(devices: Vec<HidDeviceInfo>) -> Self {
        Self {
            devices,
            denied: Vec::new(),
            fail_nonblocking: false,
            fail_metadata: false,
            fail_product: false,
            state: Rc::new(MockState::default()),
        }
    }

    pub fn state(&self) -> Rc<MockState> {
        self.state.clone()
    }
}

pub fn device(vendor_id: u16, product_id: u16) -> HidDeviceInfo {
    HidDeviceInfo {
        vendor_id,
        product_id,
        manufacturer: Some("Test Vendor".to_string()),
        product: Some(format!("Test Device {:04x}", product_id)),
        serial: Some(format!("SN{:04x}", product_id)),
        path: format!("/dev/hidraw-{:04x}-{:04x}", vendor_id, product_id),
    }
}

impl HidBackend for MockBackend {
    type Device = MockDevice;

    fn enumerate(&mut self) -> Result<Vec<HidDeviceInfo>, DeviceError> {
        self.state.enumerations.set(self.state.enumerations.get() + 1);
        Ok(self.devices.clone())
    }

    fn open(&mut self, identity: DeviceIdentity) -> Result<MockDevice, DeviceError> {
        self.state.opened.borrow_mut().push(identity);

        if self.denied.contains(&identity) {
            return Err(DeviceError::OpenDenied {
                identity,
                reason: "permission denied".to_string(),
            });
        }
        if !self.devices.iter().any(|d| d.identity() == identity) {
            return Err(DeviceError::DeviceNotFound { identity });
        }

        self.state.live.set(self.state.live.get() + 1);
        Ok(MockDevice {
            identity,
            fail_nonblocking: self.fail_nonblocking,
            fail_metadata: self.fail_metadata,
            fail_product: self.fail_product,
            state: self.state.clone(),
        })
    }
}

pub struct MockDevice {
    identity: DeviceIdentity,
    fail_nonblocking: bool,
    fail_metadata: bool,
    fail_product: bool,
    state: Rc<MockState>,
}

impl HidHandle for MockDevice {
    fn set_nonblocking(&mut self) -> Result<(), DeviceError> {
        if self.fail_nonblocking {
            return Err(DeviceError::NonBlockingConfigFailed("unsupported".to_string()));
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        self.state.reads.set(self.state.reads.get() + 1);
        match self.state.script.borrow_mut().pop_front() {
            Some(ReadStep::Report(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(ReadStep::Error) => Err(DeviceError::ReadError("device disconnected".to_string())),
            Some(ReadStep::Empty) | None => Ok(0),
        }
    }

    fn manufacturer(&self) -> Result<Option<String>, DeviceError> {
        if self.fail_metadata {
            return Err(DeviceError::MetadataReadFailed {
                what: "manufacturer",
                reason: "stalled".to_string(),
            });
        }
        Ok(Some("Test Vendor".to_string()))
    }

    fn product(&self) -> Result<Option<String>, DeviceError> {
        if self.fail_product {
            return Err(DeviceError::MetadataReadFailed {
                what: "product",
                reason: "stalled".to_string(),
            });
        }
        Ok(Some(format!("Test Device {:04x}", self.identity.product_id)))
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.state.live.set(self.state.live.get() - 1);
    }
}
