//! Scripted transport for testing without hardware.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::traits::{ControlTransport, Request, Result, UvcError};

/// One control transfer as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    /// `bmRequestType`.
    pub request_type: u8,
    /// `bRequest`.
    pub request: u8,
    /// `wValue`.
    pub value: u16,
    /// `wIndex`.
    pub index: u16,
    /// `wLength` for reads, payload length for writes.
    pub length: usize,
    /// Payload of OUT transfers, empty for IN transfers.
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<(u8, u16, u16), Vec<u8>>,
    stalled: Vec<(u8, u16, u16)>,
    transfers: Vec<RecordedTransfer>,
}

/// Transport answering from a table of scripted responses.
///
/// Reads without a scripted response stall, like a device refusing the request. A successful
/// `SET_CUR` becomes the answer to later `GET_CUR` requests on the same address.
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Create a transport with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `request` on (`value`, `index`) with `payload`.
    #[must_use]
    pub fn with_response(self, request: Request, value: u16, index: u16, payload: &[u8]) -> Self {
        self.lock()
            .responses
            .insert((request.code(), value, index), payload.to_vec());
        self
    }

    /// Stall `request` on (`value`, `index`), including writes.
    #[must_use]
    pub fn with_stall(self, request: Request, value: u16, index: u16) -> Self {
        self.lock().stalled.push((request.code(), value, index));
        self
    }

    /// Every transfer issued so far, oldest first.
    #[must_use]
    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.lock().transfers.clone()
    }

    /// `bRequest` codes issued so far, oldest first.
    #[must_use]
    pub fn request_codes(&self) -> Vec<u8> {
        self.lock().transfers.iter().map(|t| t.request).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

impl ControlTransport for MockTransport {
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> Result<usize> {
        let mut state = self.lock();
        state.transfers.push(RecordedTransfer {
            request_type,
            request,
            value,
            index,
            length: buf.len(),
            data: Vec::new(),
        });

        let key = (request, value, index);
        if state.stalled.contains(&key) {
            return Err(UvcError::Transport(rusb::Error::Pipe));
        }
        let Some(payload) = state.responses.get(&key) else {
            return Err(UvcError::Transport(rusb::Error::Pipe));
        };

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
        let mut state = self.lock();
        state.transfers.push(RecordedTransfer {
            request_type,
            request,
            value,
            index,
            length: data.len(),
            data: data.to_vec(),
        });

        if state.stalled.contains(&(request, value, index)) {
            return Err(UvcError::Transport(rusb::Error::Pipe));
        }
        if request == Request::SetCur.code() {
            state
                .responses
                .insert((Request::GetCur.code(), value, index), data.to_vec());
        }
        Ok(data.len())
    }
}

/// VideoControl descriptor block of a typical webcam: header, camera terminal 1 with
/// auto exposure mode, absolute exposure, absolute focus, absolute pan/tilt and auto focus,
/// processing unit 3 with brightness, contrast, white balance component, gain and power line
/// frequency, and an output terminal 4.
#[must_use]
pub fn sample_descriptors() -> Vec<u8> {
    let mut bytes = vec![
        // VC header, UVC 1.10
        13, 0x24, 0x01, 0x10, 0x01, 0x34, 0x00, 0x80, 0xC3, 0xC9, 0x01, 0x01, 0x01,
        // camera terminal: id 1, ITT_CAMERA, bControlSize 3
        18, 0x24, 0x02, 0x01, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03,
    ];
    // bits 1, 3, 5, 11, 17
    bytes.extend_from_slice(&[0b0010_1010, 0b0000_1000, 0b0000_0010]);
    bytes.extend_from_slice(&[
        // processing unit: id 3, source 1, bControlSize 2
        12, 0x24, 0x05, 0x03, 0x01, 0x00, 0x00, 0x02,
        // bits 0, 1, 7, 9, 10
        0b1000_0011, 0b0000_0110,
        // iProcessing, bmVideoStandards
        0x00, 0x00,
        // output terminal: id 4, USB streaming, source 3
        9, 0x24, 0x03, 0x04, 0x01, 0x01, 0x00, 0x03, 0x00,
    ]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse;
    use crate::registry::ControlId;

    #[test]
    fn test_sample_descriptors_parse() {
        let topology = parse(&sample_descriptors()).expect("sample descriptors should parse");
        assert_eq!(topology.camera_terminal.id, 1);
        assert_eq!(topology.processing_unit.id, 3);
        assert_eq!(
            topology.supported_controls(),
            vec![
                ControlId::AutoExposureMode,
                ControlId::AbsoluteExposureTime,
                ControlId::AbsoluteFocus,
                ControlId::AbsolutePanTilt,
                ControlId::AutoFocus,
                ControlId::Brightness,
                ControlId::Contrast,
                ControlId::WhiteBalanceComponent,
                ControlId::Gain,
                ControlId::PowerLineFrequency,
            ]
        );
    }

    #[test]
    fn test_unscripted_read_stalls() {
        let mock = MockTransport::new();
        let mut buf = [0u8; 2];
        let result = mock.read_control(0xA1, 0x81, 0x0200, 0x0300, &mut buf);
        assert!(result.expect_err("should stall").is_stall());
        assert_eq!(mock.transfers().len(), 1);
    }

    #[test]
    fn test_set_updates_current() {
        let mock = MockTransport::new();
        mock.write_control(0x21, 0x01, 0x0200, 0x0300, &[0x05, 0x00])
            .expect("write failed");
        let mut buf = [0u8; 2];
        let count = mock
            .read_control(0xA1, 0x81, 0x0200, 0x0300, &mut buf)
            .expect("read failed");
        assert_eq!(count, 2);
        assert_eq!(buf, [0x05, 0x00]);
    }

    #[test]
    fn test_short_response() {
        let mock = MockTransport::new().with_response(Request::GetCur, 0x0D00, 0x0100, &[1, 2]);
        let mut buf = [0u8; 8];
        let count = mock
            .read_control(0xA1, 0x81, 0x0D00, 0x0100, &mut buf)
            .expect("read failed");
        assert_eq!(count, 2);
    }
}
