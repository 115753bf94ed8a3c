//! Host-facing controller object
//!
//! [`DualShock`] is what a host instantiates: it owns the HID backend, the
//! device session, the poll scheduler and the event sink. Every host call
//! maps to one method, and none of them fail; problems are logged and the
//! object falls back to a closed or degraded-but-open state.

use crate::discovery::{self, find_known_controller, log_devices, parse_identity};
use crate::emitter::EventSink;
use crate::scheduler::{PollScheduler, DEFAULT_POLL_INTERVAL};
use crate::session::{DeviceSession, SessionState};
use crate::transport::HidBackend;
use crate::types::{DeviceIdentity, HidDeviceInfo};
use std::time::{Duration, Instant};

/// One controller instance as seen by the host
pub struct DualShock<B: HidBackend, S: EventSink> {
    backend: B,
    session: DeviceSession<B::Device>,
    scheduler: PollScheduler,
    sink: S,
}

impl<B: HidBackend, S: EventSink> DualShock<B, S> {
    /// Create an instance and run discovery
    ///
    /// With an override the given vendor/product pair is opened directly;
    /// otherwise the first attached known controller is used. If nothing
    /// opens, the attached devices are listed for diagnosis.
    pub fn create(backend: B, sink: S, device_override: Option<(&str, &str)>) -> Self {
        let mut controller = Self::with_interval(backend, sink, DEFAULT_POLL_INTERVAL);
        controller.initialize(device_override);
        controller
    }

    /// Create an instance with no device open and a custom poll interval
    pub fn with_interval(backend: B, sink: S, interval: Duration) -> Self {
        Self {
            backend,
            session: DeviceSession::new(),
            scheduler: PollScheduler::new(interval),
            sink,
        }
    }

    /// Run discovery (see [`DualShock::create`])
    pub fn initialize(&mut self, device_override: Option<(&str, &str)>) {
        match device_override {
            Some((vendor, product)) => {
                log::info!("HID: trying device {} {}", vendor, product);
                match parse_identity(vendor, product) {
                    Ok(identity) => {
                        self.open_identity(identity);
                    }
                    Err(e) => log::error!("HID: {}", e),
                }
            }
            None => self.autodetect(),
        }

        if !self.session.is_open() {
            self.list_devices();
        }
    }

    fn autodetect(&mut self) {
        let devices = match self.backend.enumerate() {
            Ok(devices) => devices,
            Err(e) => {
                log::error!("HID: {}", e);
                return;
            }
        };

        match find_known_controller(&devices) {
            Some(identity) => {
                log::info!(
                    "HID: autodetected {} ({}); attempting to set",
                    discovery::controller_name(identity.vendor_id, identity.product_id)
                        .unwrap_or("controller"),
                    identity
                );
                self.open_identity(identity);
            }
            None => log::info!("HID: no known controller attached"),
        }
    }

    /// Open a device by hex vendor/product tokens (e.g. "054c", "09cc")
    ///
    /// Malformed tokens are logged and leave the current device untouched.
    /// If the open fails the attached devices are listed.
    pub fn open(&mut self, vendor: &str, product: &str) -> bool {
        let identity = match parse_identity(vendor, product) {
            Ok(identity) => identity,
            Err(e) => {
                log::error!("HID: open takes vendor_id and product_id hex strings: {}", e);
                return false;
            }
        };

        let opened = self.open_identity(identity);
        if !opened {
            self.list_devices();
        }
        opened
    }

    /// Open a device by identity, closing any open device first
    pub fn open_identity(&mut self, identity: DeviceIdentity) -> bool {
        let opened = self.session.open(&mut self.backend, identity).is_ok();
        // Opening always leaves the session idle
        self.scheduler.stop();
        opened
    }

    /// Enumerate and log every attached HID device
    pub fn list_devices(&mut self) -> Vec<HidDeviceInfo> {
        match self.backend.enumerate() {
            Ok(devices) => {
                log_devices(&devices);
                devices
            }
            Err(e) => {
                log::error!("HID: {}", e);
                Vec::new()
            }
        }
    }

    /// Run one read cycle now, returning the number of reports processed
    pub fn read_once(&mut self) -> usize {
        self.session.read_cycle(&mut self.sink)
    }

    /// Generic "bang" from the host; same as [`DualShock::read_once`]
    pub fn trigger(&mut self) -> usize {
        self.read_once()
    }

    /// Begin timer-driven reads; ignored while closed
    pub fn start_polling(&mut self) -> bool {
        self.start_polling_at(Instant::now())
    }

    /// [`DualShock::start_polling`] with an explicit clock
    pub fn start_polling_at(&mut self, now: Instant) -> bool {
        if !self.session.start_polling() {
            return false;
        }
        self.scheduler.start(now);
        log::debug!("HID: polling every {:?}", self.scheduler.interval());
        true
    }

    pub fn stop_polling(&mut self) {
        self.session.stop_polling();
        self.scheduler.stop();
    }

    /// Host timer callback: runs a read cycle when a tick is due
    pub fn poll(&mut self, now: Instant) -> usize {
        if !self.session.is_polling() {
            self.scheduler.stop();
            return 0;
        }
        if self.scheduler.due(now) {
            self.read_once()
        } else {
            0
        }
    }

    /// How long the host may wait before the next [`DualShock::poll`]
    pub fn time_until_next_poll(&self, now: Instant) -> Option<Duration> {
        if !self.session.is_polling() {
            return None;
        }
        self.scheduler.time_until_due(now)
    }

    /// Close the open device, if any
    pub fn close(&mut self) {
        self.scheduler.stop();
        self.session.close();
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.session.identity()
    }

    pub fn device_name(&self) -> Option<&str> {
        self.session.device_name()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<B: HidBackend, S: EventSink> Drop for DualShock<B, S> {
    fn drop(&mut self) {
        self.close();
        log::debug!("HID: controller released");
    }
}
