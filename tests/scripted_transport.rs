//! End-to-end tests through the public API with an in-memory camera.

use std::cell::RefCell;
use std::collections::HashMap;

use uvc_control::{
    ControlId, ControlInfo, ControlRange, ControlTransport, FieldValue, Request, Result,
    UvcControl, UvcError,
};

/// Register file of a fake camera: one value per (selector, unit) and request.
#[derive(Default)]
struct FakeCamera {
    registers: RefCell<HashMap<(u8, u16, u16), Vec<u8>>>,
    log: RefCell<Vec<(u8, u8, u16, u16)>>,
}

impl FakeCamera {
    fn with(self, request: Request, value: u16, index: u16, payload: &[u8]) -> Self {
        self.registers
            .borrow_mut()
            .insert((request.code(), value, index), payload.to_vec());
        self
    }

    fn log(&self) -> Vec<(u8, u8, u16, u16)> {
        self.log.borrow().clone()
    }
}

impl ControlTransport for FakeCamera {
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize> {
        self.log.borrow_mut().push((request_type, request, value, index));
        let registers = self.registers.borrow();
        let payload = registers
            .get(&(request, value, index))
            .ok_or(UvcError::Transport(rusb::Error::Pipe))?;
        let count = payload.len().min(buf.len());
        buf[..count].copy_from_slice(&payload[..count]);
        Ok(count)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        self.log.borrow_mut().push((request_type, request, value, index));
        self.registers
            .borrow_mut()
            .insert((Request::GetCur.code(), value, index), data.to_vec());
        Ok(data.len())
    }
}

/// Header, camera terminal 2 (zoom, pan/tilt, auto focus) and processing unit 5 (brightness,
/// white balance temperature, auto white balance temperature), VideoControl interface 1.
fn descriptors() -> Vec<u8> {
    vec![
        13, 0x24, 0x01, 0x00, 0x01, 0x33, 0x00, 0x80, 0xC3, 0xC9, 0x01, 0x01, 0x01, //
        18, 0x24, 0x02, 0x02, 0x01, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0x03, 0x00, 0x0A, 0x02, //
        11, 0x24, 0x05, 0x05, 0x02, 0x00, 0x00, 0x02, 0x41, 0x10, 0x00,
    ]
}

const INTERFACE: u8 = 1;

#[test]
fn test_open_reports_topology() {
    let uvc = UvcControl::new(FakeCamera::default(), INTERFACE, &descriptors())
        .expect("descriptors should parse");
    let topology = uvc.topology();

    assert_eq!(topology.uvc_version_string().as_deref(), Some("1.00"));
    assert!(topology.video_standards.is_empty());
    assert_eq!(
        uvc.supported_controls(),
        vec![
            ControlId::AbsoluteZoom,
            ControlId::AbsolutePanTilt,
            ControlId::AutoFocus,
            ControlId::Brightness,
            ControlId::WhiteBalanceTemperature,
            ControlId::AutoWhiteBalanceTemperature,
        ]
    );
    assert!(uvc.transport().log().is_empty());
}

#[test]
fn test_addressing_uses_discovered_units() {
    let uvc = UvcControl::new(FakeCamera::default(), INTERFACE, &descriptors())
        .expect("descriptors should parse");

    let address = uvc.address(ControlId::Brightness).expect("resolve failed");
    assert_eq!((address.value, address.index, address.length), (0x0200, 0x0501, 2));

    let address = uvc.address(ControlId::AbsoluteZoom).expect("resolve failed");
    assert_eq!((address.value, address.index, address.length), (0x0B00, 0x0201, 2));
}

#[test]
fn test_control_by_name() {
    let camera = FakeCamera::default().with(Request::GetCur, 0x0A00, 0x0501, &[0x64, 0x19]);
    let uvc = UvcControl::new(camera, INTERFACE, &descriptors()).expect("descriptors should parse");

    let id: ControlId = "white_balance_temperature".parse().expect("registered control");
    let value = uvc.get_current(id).expect("get_current failed");
    assert_eq!(value.get("wWhiteBalanceTemperature"), Some(FieldValue::Integer(6500)));

    let err = "white_balance".parse::<ControlId>().expect_err("not a control");
    assert_eq!(err, UvcError::UnknownControl("white_balance".to_owned()));
}

#[test]
fn test_pan_tilt_session() {
    let camera = FakeCamera::default()
        .with(Request::GetInfo, 0x0D00, 0x0201, &[0x03])
        .with(Request::GetMin, 0x0D00, 0x0201, &[0xE0, 0xE3, 0xFF, 0xFF, 0xF0, 0xF1, 0xFF, 0xFF])
        .with(Request::GetMax, 0x0D00, 0x0201, &[0x20, 0x1C, 0x00, 0x00, 0x10, 0x0E, 0x00, 0x00]);
    let uvc = UvcControl::new(camera, INTERFACE, &descriptors()).expect("descriptors should parse");

    let info = uvc.get_info(ControlId::AbsolutePanTilt).expect("get_info failed");
    assert_eq!(info, ControlInfo::GET | ControlInfo::SET);

    let ControlRange::Elements(ranges) = uvc
        .get_range(ControlId::AbsolutePanTilt)
        .expect("get_range failed")
    else {
        panic!("pan/tilt has two fields");
    };
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].min, FieldValue::Integer(-7200));
    assert_eq!(ranges[1].max, FieldValue::Integer(3600));

    let target = [ranges[0].max, ranges[1].min];
    uvc.set_current(ControlId::AbsolutePanTilt, &target)
        .expect("set_current failed");
    let current = uvc.get_current(ControlId::AbsolutePanTilt).expect("get_current failed");
    assert_eq!(current.values(), target);

    let requests: Vec<u8> = uvc.transport().log().iter().map(|entry| entry.1).collect();
    assert_eq!(requests, vec![0x86, 0x82, 0x83, 0x01, 0x81]);
}

#[test]
fn test_auto_white_balance_toggle() {
    let camera = FakeCamera::default()
        .with(Request::GetDef, 0x0B00, 0x0501, &[0x01])
        .with(Request::GetInfo, 0x0A00, 0x0501, &[0b0000_0111]);
    let uvc = UvcControl::new(camera, INTERFACE, &descriptors()).expect("descriptors should parse");

    let default = uvc
        .get_default(ControlId::AutoWhiteBalanceTemperature)
        .expect("get_default failed");
    assert_eq!(default.values(), vec![FieldValue::Boolean(true)]);

    // temperature is disabled while auto white balance is on
    let info = uvc
        .get_info(ControlId::WhiteBalanceTemperature)
        .expect("get_info failed");
    assert!(info.contains(ControlInfo::DISABLED));

    uvc.set_current(ControlId::AutoWhiteBalanceTemperature, &[false.into()])
        .expect("set_current failed");
    let current = uvc
        .get_current(ControlId::AutoWhiteBalanceTemperature)
        .expect("get_current failed");
    assert_eq!(current.get("bWhiteBalanceTemperatureAuto"), Some(FieldValue::Boolean(false)));
}

#[test]
fn test_missing_processing_unit_fails_open() {
    let mut bytes = descriptors();
    bytes.truncate(13 + 18);
    let result = UvcControl::new(FakeCamera::default(), INTERFACE, &bytes);
    assert!(matches!(result, Err(UvcError::MalformedDescriptor(_))));
}

#[test]
fn test_stall_is_reported_not_retried() {
    let uvc = UvcControl::new(FakeCamera::default(), INTERFACE, &descriptors())
        .expect("descriptors should parse");

    let err = uvc.get_current(ControlId::Brightness).expect_err("unscripted read stalls");
    assert!(err.is_stall());
    assert_eq!(uvc.transport().log().len(), 1);
}
