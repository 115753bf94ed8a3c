//! DualShock USB HID input report decoder
//!
//! The controller sends 64-byte input reports over USB. Only the first ten
//! bytes carry the controls decoded here.
//!
//! # Input Report (USB, 64 bytes)
//!
//! | Byte | Content |
//! |------|---------|
//! | 0    | Report ID (0x01) |
//! | 1    | Left stick X (0-255) |
//! | 2    | Left stick Y (0-255) |
//! | 3    | Right stick X (0-255) |
//! | 4    | Right stick Y (0-255) |
//! | 5    | Bits 0-3: D-pad hat (0-7 clockwise from N, 8 = centered); bits 4-7: square, cross, circle, triangle |
//! | 6    | L1, R1, L2, R2, share, options, L3, R3 (bit 0 → bit 7) |
//! | 7    | Bit 0: PS, bit 1: touchpad click, bits 2-7: frame counter |
//! | 8    | L2 analog pressure (0-255) |
//! | 9    | R2 analog pressure (0-255) |
//!
//! The L2/R2 digital bits in byte 6 are not decoded; the analog bytes cover
//! the same triggers.

use crate::types::ControlKind;

/// Input report size in bytes
pub const REPORT_LEN: usize = 64;

/// One raw input report as read from the device
pub type RawReport = [u8; REPORT_LEN];

/// Byte holding the D-pad nibble and the face buttons
const HAT_BYTE: usize = 5;
/// Low nibble of [`HAT_BYTE`]
const HAT_MASK: u8 = 0x0F;

// Hat values per direction: the direction itself plus its two diagonals.
// Centered (8) is in none of these sets.
const HAT_NORTH: &[u8] = &[0, 1, 7];
const HAT_EAST: &[u8] = &[1, 2, 3];
const HAT_SOUTH: &[u8] = &[3, 4, 5];
const HAT_WEST: &[u8] = &[5, 6, 7];

/// Rule for pulling one control's value out of a report
///
/// Each rule reads exactly one byte, so extraction is a pure function of
/// that byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// The byte at `index`, unchanged
    Byte { index: usize },
    /// 1 if any bit of `mask` is set in the byte at `index`, else 0
    Bit { index: usize, mask: u8 },
    /// 1 if `byte & mask` is one of `values`, else 0
    Nibble {
        index: usize,
        mask: u8,
        values: &'static [u8],
    },
}

impl Extractor {
    /// Byte index this rule reads
    pub fn index(&self) -> usize {
        match *self {
            Extractor::Byte { index } => index,
            Extractor::Bit { index, .. } => index,
            Extractor::Nibble { index, .. } => index,
        }
    }

    /// Decode this rule's value from a report
    pub fn extract(&self, report: &[u8]) -> u8 {
        let Some(&byte) = report.get(self.index()) else {
            return 0;
        };
        match *self {
            Extractor::Byte { .. } => byte,
            Extractor::Bit { mask, .. } => u8::from(byte & mask != 0),
            Extractor::Nibble { mask, values, .. } => u8::from(values.contains(&(byte & mask))),
        }
    }
}

/// A named control and the rule that decodes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDescriptor {
    /// Name carried by every event for this control
    pub name: &'static str,
    /// Physical control type
    pub kind: ControlKind,
    /// Extraction rule
    pub extractor: Extractor,
}

impl ControlDescriptor {
    pub fn extract(&self, report: &[u8]) -> u8 {
        self.extractor.extract(report)
    }
}

const fn axis(name: &'static str, index: usize) -> ControlDescriptor {
    ControlDescriptor {
        name,
        kind: ControlKind::Axis,
        extractor: Extractor::Byte { index },
    }
}

const fn trigger(name: &'static str, index: usize) -> ControlDescriptor {
    ControlDescriptor {
        name,
        kind: ControlKind::Trigger,
        extractor: Extractor::Byte { index },
    }
}

const fn button(name: &'static str, index: usize, mask: u8) -> ControlDescriptor {
    ControlDescriptor {
        name,
        kind: ControlKind::Button,
        extractor: Extractor::Bit { index, mask },
    }
}

const fn direction(name: &'static str, values: &'static [u8]) -> ControlDescriptor {
    ControlDescriptor {
        name,
        kind: ControlKind::Direction,
        extractor: Extractor::Nibble {
            index: HAT_BYTE,
            mask: HAT_MASK,
            values,
        },
    }
}

/// Every decoded control, in emission order
pub static CONTROLS: &[ControlDescriptor] = &[
    // Sticks
    axis("LX", 1),
    axis("LY", 2),
    axis("RY", 4),
    axis("RX", 3),
    // D-pad
    direction("N", HAT_NORTH),
    direction("E", HAT_EAST),
    direction("S", HAT_SOUTH),
    direction("W", HAT_WEST),
    // Face buttons (byte 5, high nibble)
    button("square", 5, 0x10),
    button("cross", 5, 0x20),
    button("circle", 5, 0x40),
    button("triangle", 5, 0x80),
    // Shoulder, menu and stick buttons (byte 6)
    button("L1", 6, 0x01),
    button("R1", 6, 0x02),
    button("share", 6, 0x10),
    button("options", 6, 0x20),
    button("L3", 6, 0x40),
    button("R3", 6, 0x80),
    // System buttons (byte 7)
    button("PS", 7, 0x01),
    button("touchpad", 7, 0x02),
    // Triggers
    trigger("L2", 8),
    trigger("R2", 9),
];

/// Look up a control by name
pub fn control(name: &str) -> Option<&'static ControlDescriptor> {
    CONTROLS.iter().find(|d| d.name == name)
}

/// Decode every control from a report, in table order
pub fn decode(report: &[u8]) -> impl Iterator<Item = (&'static str, u8)> + '_ {
    CONTROLS.iter().map(move |d| (d.name, d.extract(report)))
}
