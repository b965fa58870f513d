//! Mapping from a control to the `wValue`/`wIndex`/`wLength` triple of a control transfer.

use std::collections::BTreeMap;
use std::fmt;

use crate::registry::{lookup, ControlId};
use crate::traits::{Result, UvcError, UnitType};

/// Unit ids discovered on a device, keyed by unit type.
pub type UnitIds = BTreeMap<UnitType, u8>;

/// Transfer parameters for one control on one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAddress {
    /// Control selector in the high byte, low byte zero.
    pub value: u16,
    /// Unit id in the high byte, VideoControl interface number in the low byte.
    pub index: u16,
    /// Payload length.
    pub length: u16,
}

impl fmt::Display for ControlAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wValue={:#06x} wIndex={:#06x} wLength={}",
            self.value, self.index, self.length
        )
    }
}

/// Compute the transfer parameters for `id` given the device's unit ids.
///
/// # Errors
///
/// Returns `UnitNotFound` if the device does not expose the unit the control lives on.
pub fn resolve(id: ControlId, units: &UnitIds, interface: u8) -> Result<ControlAddress> {
    let def = id.definition();
    let unit_id = units.get(&def.unit).copied().ok_or(UvcError::UnitNotFound {
        control: id,
        unit: def.unit,
    })?;

    Ok(ControlAddress {
        value: u16::from(def.selector) << 8,
        index: u16::from(unit_id) << 8 | u16::from(interface),
        length: def.length,
    })
}

/// Like [`resolve`], addressing the control by name.
///
/// # Errors
///
/// Returns `UnknownControl` for an unregistered name, otherwise as [`resolve`].
pub fn resolve_by_name(name: &str, units: &UnitIds, interface: u8) -> Result<ControlAddress> {
    resolve(lookup(name)?.id, units, interface)
}
