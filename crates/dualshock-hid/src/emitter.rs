//! Edge detection between consecutive reports
//!
//! Every control in [`CONTROLS`] is decoded from both samples. A control
//! emits exactly when its value differs; there is no deadzone or debounce.

use crate::report::CONTROLS;
use crate::types::ControlEvent;
use flume::{Sender, TrySendError};

/// Downstream consumer of control-change events
pub trait EventSink {
    fn emit(&mut self, event: ControlEvent);
}

impl EventSink for Vec<ControlEvent> {
    fn emit(&mut self, event: ControlEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<ControlEvent> {
    fn emit(&mut self, event: ControlEvent) {
        match self.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                log::warn!("HID: Event channel full, dropping {}", event);
            }
            Err(TrySendError::Disconnected(event)) => {
                log::warn!("HID: Event channel closed, dropping {}", event);
            }
        }
    }
}

/// Emit one event per control whose value changed, in table order
///
/// With no previous sample every control is emitted, announcing the
/// initial state. Returns the number of events emitted.
pub fn emit_transitions(previous: Option<&[u8]>, current: &[u8], sink: &mut impl EventSink) -> usize {
    let mut emitted = 0;
    for descriptor in CONTROLS {
        let value = descriptor.extract(current);
        if let Some(previous) = previous {
            if descriptor.extract(previous) == value {
                continue;
            }
        }
        let event = ControlEvent {
            name: descriptor.name,
            value,
        };
        log::debug!("HID: {}", event);
        sink.emit(event);
        emitted += 1;
    }
    emitted
}
