//! Device and event types shared by discovery, the session and the host
//!
//! All of these are plain values. Nothing here holds a device handle.

use std::fmt;

/// USB vendor/product pair identifying a device model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
}

impl DeviceIdentity {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self { vendor_id, product_id }
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x} {:04x}", self.vendor_id, self.product_id)
    }
}

/// Information about an enumerated HID device
///
/// A snapshot taken at enumeration time; it does not track the device afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HidDeviceInfo {
    /// USB Vendor ID
    pub vendor_id: u16,
    /// USB Product ID
    pub product_id: u16,
    /// Manufacturer string (if the device reports one)
    pub manufacturer: Option<String>,
    /// Product string (if the device reports one)
    pub product: Option<String>,
    /// Device serial number (if available)
    pub serial: Option<String>,
    /// Device filesystem path
    pub path: String,
}

impl HidDeviceInfo {
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.vendor_id, self.product_id)
    }
}

/// Physical category of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Analog stick axis (0-255, 128 is roughly centered)
    Axis,
    /// Digital button (0 or 1)
    Button,
    /// One compass direction of the D-pad (0 or 1)
    Direction,
    /// Analog trigger pressure (0-255)
    Trigger,
}

/// A single control transition
///
/// `name` is the control's table name ("LX", "cross", "N", ...). `value` is
/// 0/1 for buttons and directions, 0-255 for axes and triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub name: &'static str,
    pub value: u8,
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display_is_lower_hex() {
        let id = DeviceIdentity::new(0x054C, 0x09CC);
        assert_eq!(id.to_string(), "054c 09cc");
    }

    #[test]
    fn test_event_display() {
        let event = ControlEvent { name: "LX", value: 128 };
        assert_eq!(event.to_string(), "LX 128");
    }
}
