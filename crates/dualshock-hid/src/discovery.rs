//! Controller discovery
//!
//! Maps USB VID/PID pairs to known DualShock hardware revisions and parses
//! the hex vendor/product tokens hosts pass to `open`.

use crate::types::{DeviceIdentity, HidDeviceInfo};

/// USB Vendor ID for Sony Interactive Entertainment
pub const SONY_VID: u16 = 0x054C;

/// Known controller entry
struct KnownController {
    product_id: u16,
    name: &'static str,
}

/// Registry of known controllers, all under [`SONY_VID`]
static KNOWN_CONTROLLERS: &[KnownController] = &[
    KnownController {
        product_id: 0x09CC,
        name: "DualShock 4 (2nd revision)",
    },
    KnownController {
        product_id: 0x05C4,
        name: "DualShock 4",
    },
    KnownController {
        product_id: 0x0268,
        name: "DualShock 3",
    },
];

/// Check if a VID/PID pair is a known controller
pub fn is_known_controller(vendor_id: u16, product_id: u16) -> bool {
    controller_name(vendor_id, product_id).is_some()
}

/// Get the name for a known controller
pub fn controller_name(vendor_id: u16, product_id: u16) -> Option<&'static str> {
    if vendor_id != SONY_VID {
        return None;
    }
    KNOWN_CONTROLLERS
        .iter()
        .find(|c| c.product_id == product_id)
        .map(|c| c.name)
}

/// First enumerated device that is a known controller
pub fn find_known_controller(devices: &[HidDeviceInfo]) -> Option<DeviceIdentity> {
    devices
        .iter()
        .find(|d| is_known_controller(d.vendor_id, d.product_id))
        .map(HidDeviceInfo::identity)
}

/// Error type for vendor/product id tokens
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    #[error("Empty {0} id")]
    Empty(&'static str),

    #[error("Invalid {what} id '{token}': expected up to 4 hex digits")]
    Invalid { what: &'static str, token: String },
}

/// Parse one hex id token ("054c", "0x054C", " 9cc ")
pub fn parse_hex_id(token: &str, what: &'static str) -> Result<u16, ParseIdError> {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ParseIdError::Empty(what));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseIdError::Invalid {
            what,
            token: token.to_string(),
        });
    }

    u16::from_str_radix(digits, 16).map_err(|_| ParseIdError::Invalid {
        what,
        token: token.to_string(),
    })
}

/// Parse a vendor/product token pair into a device identity
pub fn parse_identity(vendor: &str, product: &str) -> Result<DeviceIdentity, ParseIdError> {
    Ok(DeviceIdentity::new(
        parse_hex_id(vendor, "vendor")?,
        parse_hex_id(product, "product")?,
    ))
}

/// Log every device in an enumeration snapshot
pub fn log_devices(devices: &[HidDeviceInfo]) {
    if devices.is_empty() {
        log::info!("HID: No devices attached");
        return;
    }
    for d in devices {
        log::info!(
            "{} {}",
            d.manufacturer.as_deref().unwrap_or(""),
            d.product.as_deref().unwrap_or("")
        );
        log::info!(
            "\t{:04x} {:04x} ({})",
            d.vendor_id,
            d.product_id,
            d.serial.as_deref().unwrap_or("")
        );
    }
}
