//! uvc-control: USB Video Class camera controls over the VideoControl interface
//!
//! This library maps named controls (brightness, pan/tilt, exposure, ...) onto UVC
//! class-specific control transfers. The transport sits behind the [`ControlTransport`]
//! trait, enabling both production use with a real camera through `rusb` and testing
//! with scripted transports.

pub mod address;
pub mod codec;
pub mod control;
pub mod descriptor;
pub mod device;
pub mod registry;
pub mod traits;
pub mod validation;

#[cfg(test)]
pub mod mock;

pub use address::{resolve, ControlAddress, UnitIds};
pub use codec::{ControlValue, DecodedField, FieldValue};
pub use control::{ControlInfo, ControlRange, FieldRange, ProbeReport, UvcControl};
pub use descriptor::{UnitDescriptor, VideoControlTopology, VideoStandards};
pub use device::{discover, open, DeviceFilter, UsbTransport, UvcDeviceInfo};
pub use registry::{lookup, ControlDefinition, ControlId, FieldDefinition, FieldKind};
pub use traits::{ControlTransport, Request, Result, UnitType, UvcError};
