//! Device session: one open controller and its double-buffered samples
//!
//! ```text
//! Closed ──open──▶ Idle ──start_polling──▶ Polling
//!   ▲               ▲ └────stop_polling────────┘
//!   └────close──────┴──────────close───────────┘
//! ```
//!
//! A read cycle drains every queued report. Each report is compared with
//! the last processed one before it becomes the new baseline, so quick
//! taps that span several queued reports still produce both edges.

use crate::discovery::controller_name;
use crate::emitter::{emit_transitions, EventSink};
use crate::report::{RawReport, REPORT_LEN};
use crate::transport::{DeviceError, HidBackend, HidHandle};
use crate::types::DeviceIdentity;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No device open; reads are no-ops
    Closed,
    /// Device open, reads happen on request only
    Idle,
    /// Device open, the host's timer drives reads
    Polling,
}

struct OpenDevice<D> {
    identity: DeviceIdentity,
    handle: D,
    name: String,
}

/// Owner of the open device and its samples
pub struct DeviceSession<D: HidHandle> {
    device: Option<OpenDevice<D>>,
    /// Sample being read into
    current: RawReport,
    /// Last fully processed sample (`None` until the first report after open)
    previous: Option<RawReport>,
    polling: bool,
}

impl<D: HidHandle> Default for DeviceSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HidHandle> DeviceSession<D> {
    pub fn new() -> Self {
        Self {
            device: None,
            current: [0; REPORT_LEN],
            previous: None,
            polling: false,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.device, self.polling) {
            (None, _) => SessionState::Closed,
            (Some(_), false) => SessionState::Idle,
            (Some(_), true) => SessionState::Polling,
        }
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Identity of the open device
    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.device.as_ref().map(|d| d.identity)
    }

    /// Display name of the open device
    pub fn device_name(&self) -> Option<&str> {
        self.device.as_ref().map(|d| d.name.as_str())
    }

    /// Open a device by identity, closing any device already open
    ///
    /// On failure the error is logged and the session is left closed.
    /// Failing to switch to non-blocking reads or to read the descriptive
    /// strings is logged but still leaves the device open.
    pub fn open<B>(&mut self, backend: &mut B, identity: DeviceIdentity) -> Result<(), DeviceError>
    where
        B: HidBackend<Device = D>,
    {
        self.close();

        let mut handle = backend.open(identity).map_err(|e| {
            log::error!("HID: failed to open device {}: {}", identity, e);
            e
        })?;

        if let Err(e) = handle.set_nonblocking() {
            log::warn!("HID: {}", e);
        }

        let name = match describe(&handle) {
            Ok(name) => {
                log::info!("HID: using '{}' as a controller", name);
                name
            }
            Err(e) => {
                log::error!("HID: {}", e);
                controller_name(identity.vendor_id, identity.product_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| identity.to_string())
            }
        };

        self.device = Some(OpenDevice {
            identity,
            handle,
            name,
        });
        self.previous = None;
        Ok(())
    }

    /// Close the open device, if any
    pub fn close(&mut self) {
        self.polling = false;
        if let Some(device) = self.device.take() {
            log::info!("HID: closed '{}' ({})", device.name, device.identity);
        }
    }

    /// Enable timer-driven reads; ignored while closed
    pub fn start_polling(&mut self) -> bool {
        if self.device.is_none() {
            log::warn!("HID: no device open, not starting polling");
            return false;
        }
        self.polling = true;
        true
    }

    pub fn stop_polling(&mut self) {
        self.polling = false;
    }

    /// Drain all queued reports, emitting transitions for each
    ///
    /// Stops at the first empty read. A read error is logged and ends the
    /// cycle; the device stays open for the next one. Returns the number
    /// of reports processed.
    pub fn read_cycle(&mut self, sink: &mut impl EventSink) -> usize {
        let Some(device) = self.device.as_mut() else {
            return 0;
        };

        let mut processed = 0;
        loop {
            let n = match device.handle.read(&mut self.current) {
                Ok(0) => break,
                Ok(n) => n.min(REPORT_LEN),
                Err(e) => {
                    log::error!("HID: {}", e);
                    break;
                }
            };
            self.current[n..].fill(0);

            if log::log_enabled!(log::Level::Trace) {
                let hex: Vec<String> = self.current[..n].iter().map(|b| format!("{:02x}", b)).collect();
                log::trace!("HID: report {}", hex.join(" "));
            }

            emit_transitions(self.previous.as_ref().map(|p| &p[..]), &self.current, sink);
            self.previous = Some(self.current);
            processed += 1;
        }

        log::trace!("HID: read end, {} reports", processed);
        processed
    }
}

fn describe<D: HidHandle>(handle: &D) -> Result<String, DeviceError> {
    let manufacturer = handle.manufacturer()?.unwrap_or_default();
    let product = handle.product()?.unwrap_or_default();
    Ok(format!("{} {}", manufacturer, product).trim().to_string())
}
