//! Scalar conversion from environment text
//!
//! Integers accept base prefixes (`0x`, `0o`, `0b`, and a bare leading `0` for
//! octal) with `_` digit separators. Booleans accept `1`, `t`, `true`, `0`,
//! `f` and `false` in any ASCII case. Floats use Rust's decimal/scientific
//! syntax with the same `_` separator rule as integers, and must not overflow
//! the target width. Hexadecimal float literals (`0x1p-2`) are not accepted.

use std::borrow::Cow;

use crate::error::ConversionError;
use crate::field::{FieldRef, FloatRef, IntRef, UintRef};

/// Convert `value` to the kind of `field` and assign it.
///
/// Text is assigned verbatim. [`FieldRef::Unsupported`] is a successful
/// no-op. On error the field keeps its previous value.
pub fn convert_and_set_field(value: &str, field: FieldRef<'_>) -> Result<(), ConversionError> {
    match field {
        FieldRef::Text(slot) => *slot = value.to_string(),
        FieldRef::Int(slot) => set_int(value, slot)?,
        FieldRef::Uint(slot) => set_uint(value, slot)?,
        FieldRef::Bool(slot) => *slot = parse_bool(value)?,
        FieldRef::Float(slot) => set_float(value, slot)?,
        FieldRef::Unsupported => {}
    }
    Ok(())
}

fn set_int(value: &str, slot: IntRef<'_>) -> Result<(), ConversionError> {
    fn narrow<T: TryFrom<i128>>(value: &str, n: Option<i128>) -> Result<T, ConversionError> {
        n.and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| ConversionError::int::<T>(value))
    }

    let n = parse_signed(value);
    match slot {
        IntRef::I8(slot) => *slot = narrow(value, n)?,
        IntRef::I16(slot) => *slot = narrow(value, n)?,
        IntRef::I32(slot) => *slot = narrow(value, n)?,
        IntRef::I64(slot) => *slot = narrow(value, n)?,
        IntRef::I128(slot) => *slot = narrow(value, n)?,
        IntRef::Isize(slot) => *slot = narrow(value, n)?,
    }
    Ok(())
}

fn set_uint(value: &str, slot: UintRef<'_>) -> Result<(), ConversionError> {
    fn narrow<T: TryFrom<u128>>(value: &str, n: Option<u128>) -> Result<T, ConversionError> {
        n.and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| ConversionError::uint::<T>(value))
    }

    let n = parse_unsigned(value);
    match slot {
        UintRef::U8(slot) => *slot = narrow(value, n)?,
        UintRef::U16(slot) => *slot = narrow(value, n)?,
        UintRef::U32(slot) => *slot = narrow(value, n)?,
        UintRef::U64(slot) => *slot = narrow(value, n)?,
        UintRef::U128(slot) => *slot = narrow(value, n)?,
        UintRef::Usize(slot) => *slot = narrow(value, n)?,
    }
    Ok(())
}

fn set_float(value: &str, slot: FloatRef<'_>) -> Result<(), ConversionError> {
    match slot {
        FloatRef::F32(slot) => {
            let parsed: f32 = float_text(value)
                .and_then(|text| text.parse().ok())
                .ok_or_else(|| ConversionError::float::<f32>(value))?;
            if parsed.is_infinite() && !is_infinity_literal(value) {
                return Err(ConversionError::float::<f32>(value));
            }
            *slot = parsed;
        }
        FloatRef::F64(slot) => {
            let parsed: f64 = float_text(value)
                .and_then(|text| text.parse().ok())
                .ok_or_else(|| ConversionError::float::<f64>(value))?;
            if parsed.is_infinite() && !is_infinity_literal(value) {
                return Err(ConversionError::float::<f64>(value));
            }
            *slot = parsed;
        }
    }
    Ok(())
}

/// Float text with `_` separators removed; `None` if they are misplaced.
fn float_text(value: &str) -> Option<Cow<'_, str>> {
    if !value.contains('_') {
        Some(Cow::Borrowed(value))
    } else if separators_ok(value) {
        Some(Cow::Owned(value.replace('_', "")))
    } else {
        None
    }
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_bool(value: &str) -> Result<bool, ConversionError> {
    const TRUE: [&str; 3] = ["1", "t", "true"];
    const FALSE: [&str; 3] = ["0", "f", "false"];

    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Ok(false)
    } else {
        Err(ConversionError::bool(value))
    }
}

/// Parse an optionally signed integer; `None` on syntax error or overflow.
fn parse_signed(value: &str) -> Option<i128> {
    let (negative, unsigned) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let magnitude = parse_unsigned(unsigned)?;
    if negative {
        0i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    }
}

/// Parse an unsigned integer with base-prefix detection.
fn parse_unsigned(value: &str) -> Option<u128> {
    let bytes = value.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    let (radix, digits) = if bytes[0] == b'0' && bytes.len() > 1 {
        match bytes[1].to_ascii_lowercase() {
            b'x' if bytes.len() > 2 => (16, &value[2..]),
            b'o' if bytes.len() > 2 => (8, &value[2..]),
            b'b' if bytes.len() > 2 => (2, &value[2..]),
            _ => (8, &value[1..]),
        }
    } else {
        (10, value)
    };

    if !separators_ok(value) {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    // from_str_radix would otherwise accept a leading '+'.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u128::from_str_radix(&digits, radix).ok()
}

/// `_` may only sit between digits, or directly after a base prefix.
fn separators_ok(value: &str) -> bool {
    #[derive(PartialEq)]
    enum Last {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = value.as_bytes();
    let mut last = Last::Start;
    let mut i = 0;
    let mut hex = false;

    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        i = 2;
        last = Last::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            last = Last::Digit;
        } else if b == b'_' {
            if last != Last::Digit {
                return false;
            }
            last = Last::Underscore;
        } else if last == Last::Underscore {
            return false;
        } else {
            last = Last::Other;
        }
    }

    last != Last::Underscore
}
