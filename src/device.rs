//! USB device discovery and the rusb-backed transport.

use std::fmt;
use std::time::Duration;

use rusb::{Context, Device, DeviceHandle, UsbContext};

use crate::control::UvcControl;
use crate::traits::{ControlTransport, Result, UvcError};

/// Video interface class.
pub const CC_VIDEO: u8 = 0x0E;
/// VideoControl interface subclass.
pub const SC_VIDEOCONTROL: u8 = 0x01;

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Selects which UVC device to open. Unset criteria match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    vendor_id: Option<u16>,
    product_id: Option<u16>,
    address: Option<u8>,
    timeout: Duration,
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceFilter {
    /// A filter matching the first UVC device found.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vendor_id: None,
            product_id: None,
            address: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Require a vendor id.
    #[must_use]
    pub const fn vendor_id(mut self, vendor_id: u16) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    /// Require a product id.
    #[must_use]
    pub const fn product_id(mut self, product_id: u16) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Require a device address on its bus.
    #[must_use]
    pub const fn address(mut self, address: u8) -> Self {
        self.address = Some(address);
        self
    }

    /// Timeout for each control transfer on the opened device.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a discovered device satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, info: &UvcDeviceInfo) -> bool {
        self.vendor_id.map_or(true, |id| id == info.vendor_id)
            && self.product_id.map_or(true, |id| id == info.product_id)
            && self.address.map_or(true, |address| address == info.address)
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut criteria = Vec::new();
        if let Some(id) = self.vendor_id {
            criteria.push(format!("vendor {id:04x}"));
        }
        if let Some(id) = self.product_id {
            criteria.push(format!("product {id:04x}"));
        }
        if let Some(address) = self.address {
            criteria.push(format!("address {address}"));
        }
        if criteria.is_empty() {
            f.write_str("any device")
        } else {
            f.write_str(&criteria.join(", "))
        }
    }
}

/// A UVC device found on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UvcDeviceInfo {
    /// Bus number.
    pub bus: u8,
    /// Device address on the bus.
    pub address: u8,
    /// `idVendor`.
    pub vendor_id: u16,
    /// `idProduct`.
    pub product_id: u16,
    /// Product string, when the device could be opened to read it.
    pub product: Option<String>,
    /// VideoControl interface number.
    pub interface: u8,
}

impl fmt::Display for UvcDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bus {:03} address {:03}: {:04x}:{:04x} interface {}",
            self.bus, self.address, self.vendor_id, self.product_id, self.interface
        )?;
        if let Some(product) = &self.product {
            write!(f, " ({product})")?;
        }
        Ok(())
    }
}

struct Candidate {
    device: Device<Context>,
    info: UvcDeviceInfo,
    descriptors: Vec<u8>,
}

/// List every device exposing a VideoControl interface.
///
/// Devices whose descriptors cannot be read are skipped.
pub fn discover() -> Result<Vec<UvcDeviceInfo>> {
    let context = Context::new()?;
    Ok(candidates(&context)?
        .into_iter()
        .map(|candidate| candidate.info)
        .collect())
}

/// Open the first device matching `filter`, claim its VideoControl interface and parse its
/// descriptors.
///
/// # Errors
///
/// Returns `DeviceNotFound` if nothing matches, `MalformedDescriptor` if the descriptors
/// are unusable, and `Transport` if the device cannot be opened or claimed. The interface
/// is released before any error after the claim is returned.
pub fn open(filter: &DeviceFilter) -> Result<UvcControl<UsbTransport>> {
    let context = Context::new()?;
    let candidate = candidates(&context)?
        .into_iter()
        .find(|candidate| filter.matches(&candidate.info))
        .ok_or_else(|| UvcError::DeviceNotFound(filter.to_string()))?;

    log::debug!("opening {}", candidate.info);
    let interface = candidate.info.interface;
    let transport =
        UsbTransport::claim(&candidate.device, interface)?.with_timeout(filter.timeout);

    // a failed parse drops the transport, which releases the claim
    UvcControl::new(transport, interface, &candidate.descriptors)
}

fn candidates(context: &Context) -> Result<Vec<Candidate>> {
    let devices = context.devices()?;

    let candidates = devices
        .iter()
        .filter_map(|device| match inspect(&device) {
            Ok(Some((info, descriptors))) => Some(Candidate {
                device,
                info,
                descriptors,
            }),
            Ok(None) => None,
            Err(err) => {
                log::debug!(
                    "skipping bus {:03} address {:03}: {err}",
                    device.bus_number(),
                    device.address()
                );
                None
            }
        })
        .collect();

    Ok(candidates)
}

fn inspect(device: &Device<Context>) -> Result<Option<(UvcDeviceInfo, Vec<u8>)>> {
    let descriptor = device.device_descriptor()?;
    let config = device.active_config_descriptor()?;

    let video_control = config
        .interfaces()
        .flat_map(|interface| interface.descriptors())
        .find(|desc| desc.class_code() == CC_VIDEO && desc.sub_class_code() == SC_VIDEOCONTROL);
    let Some(video_control) = video_control else {
        return Ok(None);
    };

    let product = device
        .open()
        .and_then(|handle| handle.read_product_string_ascii(&descriptor))
        .inspect_err(|err| log::debug!("product string unavailable: {err}"))
        .ok();

    let info = UvcDeviceInfo {
        bus: device.bus_number(),
        address: device.address(),
        vendor_id: descriptor.vendor_id(),
        product_id: descriptor.product_id(),
        product,
        interface: video_control.interface_number(),
    };
    Ok(Some((info, video_control.extra().to_vec())))
}

/// [`ControlTransport`] over a claimed rusb device handle.
///
/// The VideoControl interface stays claimed until [`close`](Self::close) or drop.
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    interface: u8,
    timeout: Duration,
    claimed: bool,
}

impl UsbTransport {
    /// Open `device` and claim `interface`, detaching a kernel driver where the platform
    /// supports it.
    pub fn claim(device: &Device<Context>, interface: u8) -> Result<Self> {
        let mut handle = device.open()?;
        if let Err(err) = handle.set_auto_detach_kernel_driver(true) {
            log::warn!("set_auto_detach_kernel_driver failed: {err}");
        }
        handle.claim_interface(interface)?;

        Ok(Self {
            handle,
            interface,
            timeout: DEFAULT_TIMEOUT,
            claimed: true,
        })
    }

    /// Set the per-transfer timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-transfer timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Release the interface claim.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.claimed {
            return Ok(());
        }
        self.claimed = false;
        self.handle.release_interface(self.interface)?;
        log::debug!("released interface {}", self.interface);
        Ok(())
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            log::warn!("failed to release interface {}: {err}", self.interface);
        }
    }
}

impl fmt::Debug for UsbTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsbTransport")
            .field("interface", &self.interface)
            .field("timeout", &self.timeout)
            .field("claimed", &self.claimed)
            .finish_non_exhaustive()
    }
}

impl ControlTransport for UsbTransport {
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize> {
        Ok(self
            .handle
            .read_control(request_type, request, value, index, buf, self.timeout)?)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        Ok(self
            .handle
            .write_control(request_type, request, value, index, data, self.timeout)?)
    }
}

impl UvcControl<UsbTransport> {
    /// Release the device's VideoControl interface.
    pub fn close(self) -> Result<()> {
        self.into_transport().close()
    }
}
