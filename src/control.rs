//! Request orchestration: the seven UVC verbs against a device's controls.

use std::fmt;

use bitflags::bitflags;

use crate::address::{resolve, ControlAddress, UnitIds};
use crate::codec::{decode, encode, ControlValue, FieldValue};
use crate::descriptor::{parse, VideoControlTopology};
use crate::registry::{ControlDefinition, ControlId};
use crate::traits::{ControlTransport, Request, Result, UvcError};

bitflags! {
    /// Capabilities and status reported by `GET_INFO`.
    ///
    /// Bit positions follow UVC 1.1 table 4-3, with AUTOUPDATE on D3 and ASYNCHRONOUS on D4
    /// as two distinct flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControlInfo: u8 {
        /// Supports GET requests.
        const GET = 1 << 0;
        /// Supports SET requests.
        const SET = 1 << 1;
        /// Temporarily disabled by an automatic mode.
        const DISABLED = 1 << 2;
        /// Value may change without a host request.
        const AUTOUPDATE = 1 << 3;
        /// SET completes asynchronously.
        const ASYNCHRONOUS = 1 << 4;
    }
}

impl fmt::Display for ControlInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        bitflags::parser::to_writer(self, f)
    }
}

/// Minimum and maximum of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    /// Field name.
    pub name: &'static str,
    /// `GET_MIN` value.
    pub min: FieldValue,
    /// `GET_MAX` value.
    pub max: FieldValue,
}

/// Result of `get_range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRange {
    /// Range of a single-field control, or of the first field of a mixed layout.
    Scalar {
        /// `GET_MIN` value.
        min: FieldValue,
        /// `GET_MAX` value.
        max: FieldValue,
    },
    /// One range per element of a repeated-field control, in payload order.
    Elements(Vec<FieldRange>),
}

impl fmt::Display for ControlRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { min, max } => write!(f, "{min}..={max}"),
            Self::Elements(ranges) => {
                for (i, range) in ranges.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}..={}", range.name, range.min, range.max)?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of probing every registered control with `GET_INFO`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Controls that answered, with their capability byte.
    pub answered: Vec<(ControlId, ControlInfo)>,
    /// Controls that failed, with the reason.
    pub failed: Vec<(ControlId, UvcError)>,
}

impl ProbeReport {
    /// Controls that answered `GET_INFO`.
    pub fn supported(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.answered.iter().map(|(id, _)| *id)
    }

    /// Whether `id` answered `GET_INFO`.
    #[must_use]
    pub fn is_supported(&self, id: ControlId) -> bool {
        self.supported().any(|answered| answered == id)
    }
}

/// Control access for one opened UVC device.
///
/// The unit map and interface number are fixed at construction; every operation takes
/// `&self` and issues its transfers through `T`.
pub struct UvcControl<T: ControlTransport> {
    transport: T,
    interface: u8,
    topology: VideoControlTopology,
    units: UnitIds,
}

impl<T: ControlTransport> UvcControl<T> {
    /// Parse the VideoControl descriptors and bind them to `transport`.
    ///
    /// No transfer is issued.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDescriptor` if the descriptors lack a camera terminal or processing
    /// unit.
    pub fn new(transport: T, interface: u8, descriptors: &[u8]) -> Result<Self> {
        let topology = parse(descriptors)?;
        let units = topology.unit_ids();
        Ok(Self {
            transport,
            interface,
            topology,
            units,
        })
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the handle and return the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// VideoControl interface number.
    pub const fn interface(&self) -> u8 {
        self.interface
    }

    /// Parsed descriptor topology.
    pub const fn topology(&self) -> &VideoControlTopology {
        &self.topology
    }

    /// Unit ids by unit type.
    pub const fn units(&self) -> &UnitIds {
        &self.units
    }

    /// Controls the descriptors declare. No transfer is issued.
    pub fn supported_controls(&self) -> Vec<ControlId> {
        self.topology.supported_controls()
    }

    /// Transfer parameters of `id` on this device.
    ///
    /// # Errors
    ///
    /// Returns `UnitNotFound` if the device lacks the control's unit.
    pub fn address(&self, id: ControlId) -> Result<ControlAddress> {
        resolve(id, &self.units, self.interface)
    }

    /// Read the current value.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequest` if the control has no `GET_CUR`, otherwise any resolver
    /// or transport error.
    pub fn get_current(&self, id: ControlId) -> Result<ControlValue> {
        let (def, bytes) = self.read(id, Request::GetCur)?;
        Ok(decode(&bytes, def.fields))
    }

    /// Write a new current value, one entry per field in payload order.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequest` for read-only controls, `ValueCount` or
    /// `ValueOutOfRange` for bad values, otherwise any resolver or transport error. Value
    /// errors are raised before any transfer.
    pub fn set_current(&self, id: ControlId, values: &[FieldValue]) -> Result<()> {
        let request = Request::SetCur;
        let def = permitted(id, request)?;
        let address = self.address(id)?;
        let payload = encode(def, values)?;

        log::debug!("{request} {id} {address}");
        log::trace!("{request} {id} payload {payload:02x?}");

        let written = self
            .transport
            .write_control(
                request.request_type(),
                request.code(),
                address.value,
                address.index,
                &payload,
            )
            .inspect_err(|err| log_failure(id, request, err))?;
        if written < payload.len() {
            log::warn!("{request} {id} wrote {written} of {} bytes", payload.len());
        }
        Ok(())
    }

    /// Read the minimum and maximum, in that order.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequest` if the control has no `GET_MIN`/`GET_MAX`, otherwise any
    /// resolver or transport error. `GET_MAX` is not issued if `GET_MIN` fails.
    pub fn get_range(&self, id: ControlId) -> Result<ControlRange> {
        permitted(id, Request::GetMin)?;
        permitted(id, Request::GetMax)?;

        let (def, min) = self.read(id, Request::GetMin)?;
        let (_, max) = self.read(id, Request::GetMax)?;
        let min = decode(&min, def.fields).into_fields();
        let max = decode(&max, def.fields).into_fields();

        let mut ranges = min.into_iter().zip(max).map(|(min, max)| FieldRange {
            name: min.name,
            min: min.value,
            max: max.value,
        });

        // per-element ranges only for a repeated field, e.g. pan and tilt
        if def.fields.len() > 1 && def.is_homogeneous() {
            return Ok(ControlRange::Elements(ranges.collect()));
        }
        match ranges.next() {
            Some(range) => Ok(ControlRange::Scalar {
                min: range.min,
                max: range.max,
            }),
            None => Ok(ControlRange::Elements(Vec::new())),
        }
    }

    /// Read the resolution (step size).
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequest` if the control has no `GET_RES`, otherwise any resolver
    /// or transport error.
    pub fn get_resolution(&self, id: ControlId) -> Result<ControlValue> {
        let (def, bytes) = self.read(id, Request::GetRes)?;
        Ok(decode(&bytes, def.fields))
    }

    /// Read the capability byte.
    ///
    /// # Errors
    ///
    /// Returns any resolver or transport error.
    pub fn get_info(&self, id: ControlId) -> Result<ControlInfo> {
        let request = Request::GetInfo;
        permitted(id, request)?;
        let address = self.address(id)?;

        let mut buf = [0u8; 1];
        self.transfer_in(id, request, address, &mut buf)?;
        let [bits] = buf;
        // D3 and D4 decode separately; bits D5 and up are reserved
        Ok(ControlInfo::from_bits_truncate(bits))
    }

    /// Read the default value, attaching symbol names where the registry has them.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequest` if the control has no `GET_DEF`, otherwise any resolver
    /// or transport error.
    pub fn get_default(&self, id: ControlId) -> Result<ControlValue> {
        let (def, bytes) = self.read(id, Request::GetDef)?;
        Ok(decode(&bytes, def.fields).resolve_symbols(def.fields))
    }

    /// Ask every registered control for its capability byte.
    ///
    /// Unlike [`supported_controls`](Self::supported_controls) this talks to the device, so
    /// it finds controls the descriptors misreport. Failures are collected, not returned.
    pub fn probe_supported_controls(&self) -> ProbeReport {
        let mut report = ProbeReport::default();

        for id in ControlId::ALL {
            if !self.units.contains_key(&id.definition().unit) {
                continue;
            }
            match self.get_info(id) {
                Ok(info) => report.answered.push((id, info)),
                Err(err) => report.failed.push((id, err)),
            }
        }

        log::debug!(
            "probe: {} controls answered, {} failed",
            report.answered.len(),
            report.failed.len()
        );
        report
    }

    fn read(
        &self,
        id: ControlId,
        request: Request,
    ) -> Result<(&'static ControlDefinition, Vec<u8>)> {
        let def = permitted(id, request)?;
        let address = self.address(id)?;

        let mut buf = vec![0u8; usize::from(address.length)];
        let count = self.transfer_in(id, request, address, &mut buf)?;
        buf.truncate(count);
        Ok((def, buf))
    }

    fn transfer_in(
        &self,
        id: ControlId,
        request: Request,
        address: ControlAddress,
        buf: &mut [u8],
    ) -> Result<usize> {
        log::debug!("{request} {id} {address}");

        let count = self
            .transport
            .read_control(
                request.request_type(),
                request.code(),
                address.value,
                address.index,
                buf,
            )
            .inspect_err(|err| log_failure(id, request, err))?;

        let received = buf.get(..count).unwrap_or_default();
        log::trace!("{request} {id} returned {received:02x?}");
        if count < buf.len() {
            log::warn!("{request} {id} returned {count} of {} bytes", buf.len());
        }
        Ok(count.min(buf.len()))
    }
}

impl<T: ControlTransport> fmt::Debug for UvcControl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UvcControl")
            .field("interface", &self.interface)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

fn permitted(id: ControlId, request: Request) -> Result<&'static ControlDefinition> {
    let def = id.definition();
    if def.permits(request) {
        Ok(def)
    } else {
        Err(UvcError::UnsupportedRequest {
            control: id,
            request,
        })
    }
}

fn log_failure(id: ControlId, request: Request, err: &UvcError) {
    if err.is_stall() {
        log::warn!("{request} {id} stalled");
    } else {
        log::debug!("{request} {id} failed: {err}");
    }
}
