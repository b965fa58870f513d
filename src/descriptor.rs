//! Parsing of the class-specific VideoControl interface descriptors.
//!
//! The block handed over by the USB stack (`extra` bytes of the VideoControl interface) is a
//! sequence of length-prefixed sub-descriptors. Only three of them matter here: the VC
//! header, the camera input terminal and the processing unit.

use bitflags::bitflags;

use crate::address::UnitIds;
use crate::registry::{capability_table, ControlId};
use crate::traits::{Result, UnitType, UvcError};

/// Class-specific interface descriptor type.
pub const CS_INTERFACE: u8 = 0x24;
/// VideoControl header subtype.
pub const VC_HEADER: u8 = 0x01;
/// Input terminal subtype.
pub const VC_INPUT_TERMINAL: u8 = 0x02;
/// Processing unit subtype.
pub const VC_PROCESSING_UNIT: u8 = 0x05;
/// Input terminal type of a camera sensor.
pub const ITT_CAMERA: u16 = 0x0201;

const CT_CONTROL_SIZE_OFFSET: usize = 14;
const PU_CONTROL_SIZE_OFFSET: usize = 7;

bitflags! {
    /// Analog video standards a processing unit can decode (`bmVideoStandards`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VideoStandards: u8 {
        /// No analog decoding.
        const NONE = 1 << 0;
        /// NTSC, 525 lines, 60 Hz.
        const NTSC_525_60 = 1 << 1;
        /// PAL, 625 lines, 50 Hz.
        const PAL_625_50 = 1 << 2;
        /// SECAM, 625 lines, 50 Hz.
        const SECAM_625_50 = 1 << 3;
        /// NTSC, 625 lines, 50 Hz.
        const NTSC_625_50 = 1 << 4;
        /// PAL, 525 lines, 60 Hz.
        const PAL_525_60 = 1 << 5;
    }
}

/// A camera terminal or processing unit found in the descriptor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    /// `bTerminalID` / `bUnitID`.
    pub id: u8,
    /// Which entity this is.
    pub unit_type: UnitType,
    /// Raw `bmControls`, one entry per table slot including reserved ones.
    pub capabilities: Vec<bool>,
    /// Registered controls whose capability bit is set.
    pub supported: Vec<ControlId>,
}

impl UnitDescriptor {
    fn new(id: u8, unit_type: UnitType, bitmap: &[u8]) -> Self {
        let table = capability_table(unit_type);
        let capabilities = decode_bitmap(bitmap, table.len());
        let supported = table
            .iter()
            .zip(&capabilities)
            .filter_map(|(slot, set)| if *set { *slot } else { None })
            .collect();

        Self {
            id,
            unit_type,
            capabilities,
            supported,
        }
    }
}

/// What the descriptor block says about the device's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoControlTopology {
    /// `bcdUVC` from the VC header, if the header was present.
    pub uvc_version: Option<u16>,
    /// The camera input terminal.
    pub camera_terminal: UnitDescriptor,
    /// The processing unit.
    pub processing_unit: UnitDescriptor,
    /// Analog standards the processing unit decodes; empty on UVC 1.0 descriptors.
    pub video_standards: VideoStandards,
}

impl VideoControlTopology {
    /// Unit ids keyed by unit type, as the resolver wants them.
    #[must_use]
    pub fn unit_ids(&self) -> UnitIds {
        UnitIds::from([
            (UnitType::CameraTerminal, self.camera_terminal.id),
            (UnitType::ProcessingUnit, self.processing_unit.id),
        ])
    }

    /// Controls the descriptors declare, camera terminal first.
    #[must_use]
    pub fn supported_controls(&self) -> Vec<ControlId> {
        self.camera_terminal
            .supported
            .iter()
            .chain(&self.processing_unit.supported)
            .copied()
            .collect()
    }

    /// Human-readable UVC revision, e.g. "1.10".
    #[must_use]
    pub fn uvc_version_string(&self) -> Option<String> {
        self.uvc_version
            .map(|bcd| format!("{:x}.{:02x}", bcd >> 8, bcd & 0xFF))
    }
}

/// Split a descriptor block into its sub-descriptors.
///
/// A final sub-descriptor whose length byte exceeds the remaining bytes is returned
/// truncated.
///
/// # Errors
///
/// Returns `MalformedDescriptor` on a zero length byte.
pub fn split_descriptors(bytes: &[u8]) -> Result<Vec<&[u8]>> {
    let mut descriptors = Vec::new();
    let mut rest = bytes;

    while let Some(&length) = rest.first() {
        if length == 0 {
            return Err(UvcError::MalformedDescriptor(format!(
                "zero-length sub-descriptor at byte {}",
                bytes.len() - rest.len()
            )));
        }
        let (descriptor, tail) = rest.split_at(usize::from(length).min(rest.len()));
        descriptors.push(descriptor);
        rest = tail;
    }

    Ok(descriptors)
}

/// Expand a little-endian bitmap into `slots` booleans, bit 0 of byte 0 first.
///
/// Positions past the end of `bitmap` are unset; bits past `slots` are ignored.
#[must_use]
pub fn decode_bitmap(bitmap: &[u8], slots: usize) -> Vec<bool> {
    (0..slots)
        .map(|bit| {
            bitmap
                .get(bit / 8)
                .is_some_and(|byte| byte & (1 << (bit % 8)) != 0)
        })
        .collect()
}

/// Parse the VideoControl descriptor block.
///
/// # Errors
///
/// Returns `MalformedDescriptor` if the block cannot be split, or if the camera terminal or
/// processing unit is missing or too short to hold its id and control size.
pub fn parse(bytes: &[u8]) -> Result<VideoControlTopology> {
    let mut uvc_version = None;
    let mut camera_terminal = None;
    let mut processing_unit = None;
    let mut video_standards = VideoStandards::empty();

    for descriptor in split_descriptors(bytes)? {
        if descriptor.get(1) != Some(&CS_INTERFACE) {
            continue;
        }
        match descriptor.get(2).copied() {
            Some(VC_HEADER) => {
                uvc_version = read_u16(descriptor, 3);
            }
            Some(VC_INPUT_TERMINAL) if read_u16(descriptor, 4) == Some(ITT_CAMERA) => {
                if camera_terminal.is_none() {
                    camera_terminal = Some(parse_unit(
                        descriptor,
                        UnitType::CameraTerminal,
                        CT_CONTROL_SIZE_OFFSET,
                    )?);
                }
            }
            Some(VC_PROCESSING_UNIT) => {
                if processing_unit.is_none() {
                    let unit =
                        parse_unit(descriptor, UnitType::ProcessingUnit, PU_CONTROL_SIZE_OFFSET)?;
                    video_standards = processing_unit_standards(descriptor);
                    processing_unit = Some(unit);
                }
            }
            _ => {}
        }
    }

    let camera_terminal = camera_terminal.ok_or_else(|| {
        UvcError::MalformedDescriptor("no camera terminal descriptor".to_owned())
    })?;
    let processing_unit = processing_unit.ok_or_else(|| {
        UvcError::MalformedDescriptor("no processing unit descriptor".to_owned())
    })?;

    log::debug!(
        "camera terminal {} declares {} controls, processing unit {} declares {}",
        camera_terminal.id,
        camera_terminal.supported.len(),
        processing_unit.id,
        processing_unit.supported.len()
    );

    Ok(VideoControlTopology {
        uvc_version,
        camera_terminal,
        processing_unit,
        video_standards,
    })
}

fn parse_unit(
    descriptor: &[u8],
    unit_type: UnitType,
    size_offset: usize,
) -> Result<UnitDescriptor> {
    let (Some(&id), Some(&size)) = (descriptor.get(3), descriptor.get(size_offset)) else {
        return Err(UvcError::MalformedDescriptor(format!(
            "{unit_type} descriptor truncated to {} bytes",
            descriptor.len()
        )));
    };

    let start = size_offset + 1;
    let end = (start + usize::from(size)).min(descriptor.len());
    let bitmap = descriptor.get(start..end).unwrap_or_default();
    if bitmap.len() < usize::from(size) {
        log::warn!(
            "{unit_type} {id} declares {size} control bytes but carries {}",
            bitmap.len()
        );
    }

    Ok(UnitDescriptor::new(id, unit_type, bitmap))
}

fn processing_unit_standards(descriptor: &[u8]) -> VideoStandards {
    let Some(&size) = descriptor.get(PU_CONTROL_SIZE_OFFSET) else {
        return VideoStandards::empty();
    };
    // bmVideoStandards follows iProcessing and only exists from UVC 1.1 on
    let offset = PU_CONTROL_SIZE_OFFSET + 2 + usize::from(size);
    descriptor
        .get(offset)
        .map_or_else(VideoStandards::empty, |bits| {
            VideoStandards::from_bits_truncate(*bits)
        })
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    match bytes.get(offset..offset + 2) {
        Some(&[lo, hi]) => Some(u16::from_le_bytes([lo, hi])),
        _ => None,
    }
}
