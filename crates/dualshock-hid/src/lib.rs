//! DualShock controller support over USB HID
//!
//! This crate provides:
//! - Decoding of the controller's 64-byte input report into named controls
//! - Edge detection: one event per control whose value changed
//! - A device session that drains every queued report per read cycle
//! - Discovery of known controllers (or an explicit vendor/product override)
//! - A poll scheduler the host drives from its own timer
//! - A hidapi backend behind a small transport trait
//!
//! # Architecture
//!
//! ```text
//! host timer → DualShock::poll() → DeviceSession::read_cycle()
//!     → hidapi read (non-blocking, until empty)
//!     → report decoder (previous vs current) → EventSink
//! ```
//!
//! Everything runs on the caller's thread. Reads never block, so `poll`
//! and `read_once` are safe to call from a single-threaded event loop.

mod config;
mod controller;
mod discovery;
mod emitter;
mod hid;
mod report;
mod scheduler;
mod session;
mod transport;
mod types;

#[cfg(test)]
mod mock;

pub use config::{default_config_path, load_config, save_config, DualShockConfig};
pub use controller::DualShock;
pub use discovery::{
    controller_name, find_known_controller, is_known_controller, parse_hex_id, parse_identity,
    ParseIdError, SONY_VID,
};
pub use emitter::{emit_transitions, EventSink};
pub use hid::{HidApiBackend, HidApiDevice};
pub use report::{control, decode, ControlDescriptor, Extractor, RawReport, CONTROLS, REPORT_LEN};
pub use scheduler::{PollScheduler, DEFAULT_POLL_INTERVAL};
pub use session::{DeviceSession, SessionState};
pub use transport::{DeviceError, HidBackend, HidHandle};
pub use types::{ControlEvent, ControlKind, DeviceIdentity, HidDeviceInfo};
