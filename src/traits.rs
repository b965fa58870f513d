//! Core traits and types for UVC control access.

use std::fmt;

use rusb::{Direction, Recipient, RequestType};

use crate::registry::ControlId;

/// Class-specific VideoControl request codes (UVC 1.1, table A-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Request {
    /// Set the current value.
    SetCur = 0x01,
    /// Read the current value.
    GetCur = 0x81,
    /// Read the minimum value.
    GetMin = 0x82,
    /// Read the maximum value.
    GetMax = 0x83,
    /// Read the resolution (step size).
    GetRes = 0x84,
    /// Read the capability/status byte.
    GetInfo = 0x86,
    /// Read the default value.
    GetDef = 0x87,
}

impl Request {
    /// Every request verb, in wire-code order.
    pub const ALL: [Self; 7] = [
        Self::SetCur,
        Self::GetCur,
        Self::GetMin,
        Self::GetMax,
        Self::GetRes,
        Self::GetInfo,
        Self::GetDef,
    ];

    /// The `bRequest` byte.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Transfer direction: only `SET_CUR` sends data to the device.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::SetCur => Direction::Out,
            _ => Direction::In,
        }
    }

    /// The `bmRequestType` byte: class request addressed to an interface.
    #[must_use]
    pub fn request_type(self) -> u8 {
        rusb::request_type(self.direction(), RequestType::Class, Recipient::Interface)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SetCur => "SET_CUR",
            Self::GetCur => "GET_CUR",
            Self::GetMin => "GET_MIN",
            Self::GetMax => "GET_MAX",
            Self::GetRes => "GET_RES",
            Self::GetInfo => "GET_INFO",
            Self::GetDef => "GET_DEF",
        };
        f.write_str(name)
    }
}

/// The UVC entity a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitType {
    /// Camera (input) terminal: optical and sensor controls.
    CameraTerminal,
    /// Processing unit: image-processing controls.
    ProcessingUnit,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraTerminal => f.write_str("camera terminal"),
            Self::ProcessingUnit => f.write_str("processing unit"),
        }
    }
}

/// Error type for UVC control operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UvcError {
    /// No control is registered under this name.
    #[error("Unknown control: {0}")]
    UnknownControl(String),
    /// The device does not expose the unit a control lives on.
    #[error("Device has no {unit} for control {control}")]
    UnitNotFound {
        /// Control that was addressed.
        control: ControlId,
        /// Unit the control requires.
        unit: UnitType,
    },
    /// The request verb is not declared for this control.
    #[error("{request} is not supported by control {control}")]
    UnsupportedRequest {
        /// Control that was addressed.
        control: ControlId,
        /// Rejected verb.
        request: Request,
    },
    /// The VideoControl descriptor block is missing a required sub-descriptor.
    #[error("Malformed VideoControl descriptor: {0}")]
    MalformedDescriptor(String),
    /// A value does not fit in its field.
    #[error("Value {value} out of range for field {field}")]
    ValueOutOfRange {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// The number of values supplied does not match the control's field count.
    #[error("Control {control} takes {expected} values, got {actual}")]
    ValueCount {
        /// Control that was addressed.
        control: ControlId,
        /// Number of fields in the control.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A control definition violates its layout invariants.
    #[error("Invalid layout for control {control}: {reason}")]
    InvalidLayout {
        /// Offending control.
        control: ControlId,
        /// What is wrong with it.
        reason: String,
    },
    /// No UVC device matched the requested filter.
    #[error("No UVC device found matching {0}")]
    DeviceNotFound(String),
    /// The device has no VideoControl interface.
    #[error("Device has no VideoControl interface")]
    InterfaceNotFound,
    /// Failure reported by the USB stack, including protocol stalls.
    #[error("USB transfer failed: {0}")]
    Transport(#[from] rusb::Error),
}

impl UvcError {
    /// Whether the device answered with a protocol stall, its way of refusing a request.
    #[must_use]
    pub const fn is_stall(&self) -> bool {
        matches!(self, Self::Transport(rusb::Error::Pipe))
    }
}

/// Result type for UVC control operations.
pub type Result<T> = std::result::Result<T, UvcError>;

/// Abstraction over the USB control-transfer primitive.
///
/// Implementations own framing, timeouts and bus errors. Physical transfers must be
/// serialized per device; the controls layered on top take `&self` and hold no locks.
pub trait ControlTransport {
    /// Issue a device-to-host control transfer into `buf`.
    ///
    /// Returns the number of bytes the device actually sent, which may be fewer than
    /// `buf.len()`.
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize>;

    /// Issue a host-to-device control transfer carrying `data`.
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize>;
}
