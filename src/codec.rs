//! Packing and unpacking of control payloads.
//!
//! Payloads are little-endian and every field sits at a fixed offset. Devices are allowed
//! to answer with fewer bytes than declared; missing bytes read as zero.

use std::fmt;

use crate::registry::{ControlDefinition, FieldDefinition, FieldKind};
use crate::traits::{Result, UvcError};
use crate::validation::{fits, validate_definition};

/// A decoded field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Signed, unsigned and bitmap fields.
    Integer(i64),
    /// Boolean fields.
    Boolean(bool),
}

impl FieldValue {
    /// The value as an integer; booleans map to 0 and 1.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Integer(value) => value,
            Self::Boolean(value) => value as i64,
        }
    }

    /// The value as a boolean; integers are true when non-zero.
    #[must_use]
    pub const fn as_bool(self) -> bool {
        match self {
            Self::Integer(value) => value != 0,
            Self::Boolean(value) => value,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// One decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    /// Field name.
    pub name: &'static str,
    /// Decoded value.
    pub value: FieldValue,
    /// Symbolic name for the value, when resolved and known.
    pub symbol: Option<&'static str>,
}

/// Ordered field-name to value mapping for one control payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlValue {
    fields: Vec<DecodedField>,
}

impl ControlValue {
    /// Value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.field(name).map(|field| field.value)
    }

    /// The named field with its symbol.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Decoded fields in payload order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecodedField> {
        self.fields.iter()
    }

    /// Values in payload order, ready to pass back to `encode`.
    #[must_use]
    pub fn values(&self) -> Vec<FieldValue> {
        self.fields.iter().map(|field| field.value).collect()
    }

    /// Number of decoded fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attach symbol names from the field definitions where a value has one.
    ///
    /// A value without a matching symbol keeps `symbol: None`.
    #[must_use]
    pub fn resolve_symbols(mut self, definitions: &[FieldDefinition]) -> Self {
        for field in &mut self.fields {
            field.symbol = definitions
                .iter()
                .find(|def| def.name == field.name)
                .and_then(|def| def.symbol_for(field.value.as_i64()));
        }
        self
    }

    pub(crate) fn into_fields(self) -> Vec<DecodedField> {
        self.fields
    }
}

impl<'a> IntoIterator for &'a ControlValue {
    type Item = &'a DecodedField;
    type IntoIter = std::slice::Iter<'a, DecodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field.name, field.value)?;
            if let Some(symbol) = field.symbol {
                write!(f, " ({symbol})")?;
            }
        }
        Ok(())
    }
}

/// Pack `values` into a payload of exactly `def.length` bytes.
///
/// Values are matched to fields by position. Booleans are accepted for integer fields and
/// 0/1 integers for boolean fields.
///
/// # Errors
///
/// - `ValueCount` if the number of values differs from the number of fields
/// - `ValueOutOfRange` if a value does not fit its field
/// - `InvalidLayout` if the definition itself is inconsistent
pub fn encode(def: &ControlDefinition, values: &[FieldValue]) -> Result<Vec<u8>> {
    validate_definition(def)?;

    if values.len() != def.fields.len() {
        return Err(UvcError::ValueCount {
            control: def.id,
            expected: def.fields.len(),
            actual: values.len(),
        });
    }

    let mut payload = vec![0u8; usize::from(def.length)];
    for (field, value) in def.fields.iter().zip(values) {
        if field.is_placeholder() {
            continue;
        }

        let raw = value.as_i64();
        if !fits(field.kind, field.size, raw) {
            return Err(UvcError::ValueOutOfRange {
                field: field.name,
                value: raw,
            });
        }

        let bytes = raw.to_le_bytes();
        let dst = payload
            .get_mut(field.offset..field.end())
            .ok_or_else(|| UvcError::InvalidLayout {
                control: def.id,
                reason: format!("field {} outside payload", field.name),
            })?;
        for (dst, src) in dst.iter_mut().zip(bytes) {
            *dst = src;
        }
    }

    Ok(payload)
}

/// Unpack `bytes` into one value per field.
///
/// Each field reads whatever part of its byte range the buffer holds; a field with no bytes
/// available decodes as zero (or `false`). Signed fields sign-extend from the bytes actually
/// read. Zero-width placeholder fields are skipped.
#[must_use]
pub fn decode(bytes: &[u8], fields: &[FieldDefinition]) -> ControlValue {
    let fields = fields
        .iter()
        .filter(|field| !field.is_placeholder())
        .map(|field| DecodedField {
            name: field.name,
            value: read_field(bytes, field),
            symbol: None,
        })
        .collect();

    ControlValue { fields }
}

fn read_field(bytes: &[u8], field: &FieldDefinition) -> FieldValue {
    let end = field.end().min(bytes.len());
    let available = bytes.get(field.offset..end).unwrap_or_default();

    let mut raw = [0u8; 4];
    for (dst, src) in raw.iter_mut().zip(available) {
        *dst = *src;
    }
    let unsigned = u32::from_le_bytes(raw);

    match field.kind {
        FieldKind::Boolean => FieldValue::Boolean(unsigned != 0),
        FieldKind::Unsigned | FieldKind::Bitmap => FieldValue::Integer(i64::from(unsigned)),
        FieldKind::Signed => {
            let read = available.len().min(raw.len());
            if read == 0 {
                return FieldValue::Integer(0);
            }
            #[allow(clippy::cast_possible_truncation)]
            let shift = (32 - read * 8) as u32;
            #[allow(clippy::cast_possible_wrap)]
            let signed = ((unsigned << shift) as i32) >> shift;
            FieldValue::Integer(i64::from(signed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ControlId;

    #[test]
    fn test_encode_brightness() {
        let def = ControlId::Brightness.definition();
        let payload = encode(def, &[FieldValue::Integer(-2)]).expect("encode failed");
        assert_eq!(payload, vec![0xFE, 0xFF]);
    }

    #[test]
    fn test_encode_pan_tilt() {
        let def = ControlId::AbsolutePanTilt.definition();
        let values = [FieldValue::Integer(3600), FieldValue::Integer(-7200)];
        let payload = encode(def, &values).expect("encode failed");
        assert_eq!(payload, vec![0x10, 0x0E, 0x00, 0x00, 0xE0, 0xE3, 0xFF, 0xFF]);
    }

    #[test]
    fn test_encode_pads_to_payload_length() {
        let def = ControlId::AbsoluteExposureTime.definition();
        let payload = encode(def, &[156u32.into()]).expect("encode failed");
        assert_eq!(payload.len(), 4);
        assert_eq!(payload, vec![156, 0, 0, 0]);
    }

    #[test]
    fn test_encode_value_count() {
        let def = ControlId::AbsolutePanTilt.definition();
        let result = encode(def, &[FieldValue::Integer(0)]);
        assert_eq!(
            result,
            Err(UvcError::ValueCount {
                control: ControlId::AbsolutePanTilt,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_encode_out_of_range() {
        let def = ControlId::Brightness.definition();
        let result = encode(def, &[FieldValue::Integer(40_000)]);
        assert_eq!(
            result,
            Err(UvcError::ValueOutOfRange {
                field: "wBrightness",
                value: 40_000,
            })
        );

        let def = ControlId::Contrast.definition();
        assert!(encode(def, &[FieldValue::Integer(-1)]).is_err());

        let def = ControlId::AutoFocus.definition();
        assert!(encode(def, &[FieldValue::Integer(2)]).is_err());
    }

    #[test]
    fn test_encode_boolean() {
        let def = ControlId::AutoFocus.definition();
        assert_eq!(encode(def, &[true.into()]).expect("encode failed"), vec![1]);
        assert_eq!(encode(def, &[FieldValue::Integer(0)]).expect("encode failed"), vec![0]);
    }

    #[test]
    fn test_decode_signed() {
        let def = ControlId::Brightness.definition();
        let value = decode(&[0xF6, 0xFF], def.fields);
        assert_eq!(value.get("wBrightness"), Some(FieldValue::Integer(-10)));
    }

    #[test]
    fn test_decode_unsigned() {
        let def = ControlId::WhiteBalanceTemperature.definition();
        let value = decode(&[0x70, 0x17], def.fields);
        assert_eq!(value.get("wWhiteBalanceTemperature"), Some(FieldValue::Integer(6000)));
    }

    #[test]
    fn test_decode_boolean_non_zero() {
        let def = ControlId::AutoFocus.definition();
        let value = decode(&[0x02], def.fields);
        assert_eq!(value.get("bFocusAuto"), Some(FieldValue::Boolean(true)));
    }

    #[test]
    fn test_decode_empty_buffer_boolean() {
        let def = ControlId::AutoFocus.definition();
        let value = decode(&[], def.fields);
        assert_eq!(value.len(), 1);
        assert_eq!(value.get("bFocusAuto"), Some(FieldValue::Boolean(false)));
    }

    #[test]
    fn test_decode_short_buffer() {
        // device answered one byte of a two-byte signed field
        let def = ControlId::Brightness.definition();
        let value = decode(&[0xFF], def.fields);
        assert_eq!(value.get("wBrightness"), Some(FieldValue::Integer(-1)));

        // second pan/tilt element entirely missing
        let def = ControlId::AbsolutePanTilt.definition();
        let value = decode(&[0x10, 0x0E, 0x00, 0x00], def.fields);
        assert_eq!(value.get("dwPanAbsolute"), Some(FieldValue::Integer(3600)));
        assert_eq!(value.get("dwTiltAbsolute"), Some(FieldValue::Integer(0)));
    }

    #[test]
    fn test_decode_skips_placeholder_fields() {
        let fields = [
            FieldDefinition {
                name: "bValue",
                offset: 0,
                size: 1,
                kind: FieldKind::Unsigned,
                symbols: &[],
            },
            FieldDefinition {
                name: "marker",
                offset: 0,
                size: 0,
                kind: FieldKind::Unsigned,
                symbols: &[],
            },
        ];
        let value = decode(&[7], &fields);
        assert_eq!(value.len(), 1);
        assert_eq!(value.get("marker"), None);
    }

    #[test]
    fn test_round_trip_every_control() {
        for def in crate::registry::definitions() {
            let values: Vec<FieldValue> = def
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| match field.kind {
                    FieldKind::Boolean => FieldValue::Boolean(i % 2 == 0),
                    FieldKind::Signed => FieldValue::Integer(-1 - i as i64),
                    FieldKind::Unsigned | FieldKind::Bitmap => FieldValue::Integer(1 + i as i64),
                })
                .collect();

            let payload = encode(def, &values).expect("encode failed");
            assert_eq!(payload.len(), usize::from(def.length), "{}", def.id);
            assert_eq!(decode(&payload, def.fields).values(), values, "{}", def.id);
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        let def = ControlId::AbsolutePanTilt.definition();
        let values = [FieldValue::from(i32::MIN), FieldValue::from(i32::MAX)];
        let payload = encode(def, &values).expect("encode failed");
        assert_eq!(decode(&payload, def.fields).values(), values);

        let def = ControlId::AbsoluteExposureTime.definition();
        let values = [FieldValue::from(u32::MAX)];
        let payload = encode(def, &values).expect("encode failed");
        assert_eq!(decode(&payload, def.fields).values(), values);
    }

    #[test]
    fn test_resolve_symbols() {
        let def = ControlId::AutoExposureMode.definition();
        let value = decode(&[0b0100], def.fields).resolve_symbols(def.fields);
        let field = value.field("bAutoExposureMode").expect("field decoded");
        assert_eq!(field.symbol, Some("SHUTTER_PRIORITY"));

        // combined bitmap has no single name
        let value = decode(&[0b0110], def.fields).resolve_symbols(def.fields);
        assert_eq!(value.field("bAutoExposureMode").and_then(|f| f.symbol), None);
    }

    #[test]
    fn test_display() {
        let def = ControlId::PowerLineFrequency.definition();
        let value = decode(&[2], def.fields).resolve_symbols(def.fields);
        assert_eq!(value.to_string(), "bPowerLineFrequency=2 (HZ_60)");
    }
}
