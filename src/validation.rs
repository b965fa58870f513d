//! Layout validation for control definitions.
//!
//! The codec writes fields at fixed offsets, so every definition it touches must keep its
//! fields inside the payload and apart from each other.

use std::collections::HashSet;

use crate::registry::{ControlDefinition, FieldKind};
use crate::traits::{Result, UvcError};

/// Widest field the codec packs, in bytes.
pub const MAX_FIELD_SIZE: usize = 4;

/// Validates the field layout of a single control.
///
/// # Errors
///
/// Returns `InvalidLayout` if:
/// - A field is wider than [`MAX_FIELD_SIZE`] or a boolean is wider than one byte
/// - A field extends past the declared payload length
/// - Two fields overlap
/// - A symbol value does not fit its field
pub fn validate_definition(def: &ControlDefinition) -> Result<()> {
    let invalid = |reason: String| UvcError::InvalidLayout {
        control: def.id,
        reason,
    };

    let length = usize::from(def.length);
    let mut fields: Vec<_> = def.fields.iter().filter(|f| !f.is_placeholder()).collect();

    for field in &fields {
        if field.size > MAX_FIELD_SIZE {
            return Err(invalid(format!(
                "field {} is {} bytes wide (max {MAX_FIELD_SIZE})",
                field.name, field.size
            )));
        }
        if field.kind == FieldKind::Boolean && field.size != 1 {
            return Err(invalid(format!("boolean field {} is not one byte", field.name)));
        }
        if field.end() > length {
            return Err(invalid(format!(
                "field {} ends at byte {} past payload length {length}",
                field.name,
                field.end()
            )));
        }
        if let Some(symbol) = field
            .symbols
            .iter()
            .find(|symbol| !fits(field.kind, field.size, symbol.value))
        {
            return Err(invalid(format!(
                "symbol {} = {} does not fit field {}",
                symbol.name, symbol.value, field.name
            )));
        }
    }

    fields.sort_by_key(|field| field.offset);
    for pair in fields.windows(2) {
        if let [first, second] = pair {
            if first.end() > second.offset {
                return Err(invalid(format!(
                    "fields {} and {} overlap",
                    first.name, second.name
                )));
            }
        }
    }

    Ok(())
}

/// Validates every definition plus the registry-wide invariants.
///
/// # Errors
///
/// Returns `InvalidLayout` if any definition is invalid, if an id is registered twice, or if
/// two controls of the same unit type share a selector.
pub fn validate_registry(defs: &[&ControlDefinition]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut selectors = HashSet::new();

    for def in defs {
        validate_definition(def)?;

        if !ids.insert(def.id) {
            return Err(UvcError::InvalidLayout {
                control: def.id,
                reason: "registered twice".to_owned(),
            });
        }
        if !selectors.insert((def.unit, def.selector)) {
            return Err(UvcError::InvalidLayout {
                control: def.id,
                reason: format!("selector {:#04x} already used on the {}", def.selector, def.unit),
            });
        }
    }

    Ok(())
}

/// Whether `value` is representable in a field of this kind and width.
#[must_use]
pub fn fits(kind: FieldKind, size: usize, value: i64) -> bool {
    let (min, max) = bounds(kind, size);
    (min..=max).contains(&i128::from(value))
}

/// Inclusive value range of a field of this kind and width.
#[must_use]
pub fn bounds(kind: FieldKind, size: usize) -> (i128, i128) {
    #[allow(clippy::cast_possible_truncation)]
    let bits = (size.min(MAX_FIELD_SIZE) * 8) as u32;
    if bits == 0 {
        return (0, 0);
    }
    match kind {
        FieldKind::Signed => (-(1_i128 << (bits - 1)), (1_i128 << (bits - 1)) - 1),
        FieldKind::Boolean => (0, 1),
        FieldKind::Unsigned | FieldKind::Bitmap => (0, (1_i128 << bits) - 1),
    }
}
