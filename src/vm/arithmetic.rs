//! Arithmetic over the value domain.
//!
//! - ADD: numeric + numeric only.
//! - SUB: numeric - numeric, or letter - letter. Letters subtract by alphabet
//!   position (A = 1), case-insensitively; the result is the uppercase letter
//!   at the difference, and a difference below 1 is an overflow.
//! - BUMPUP/BUMPDN: numeric only, +1/-1.
//!
//! Integers are `i64`; anything that leaves that range is an overflow.

use crate::core::{HrmError, HrmResult, Value, ValueKind};

/// `register + floor`.
pub fn add(register: &Value, floor: &Value) -> HrmResult<Value> {
    match (register.to_integer(), floor.to_integer()) {
        (Some(a), Some(b)) => a
            .checked_add(b)
            .map(Value::number)
            .ok_or_else(|| HrmError::overflow(format!("{} + {} does not fit", a, b))),
        _ => Err(HrmError::math_domain(format!(
            "cannot add '{}' and '{}': ADD needs two numbers",
            register, floor
        ))),
    }
}

/// `register - floor`.
pub fn sub(register: &Value, floor: &Value) -> HrmResult<Value> {
    match (register.kind(), floor.kind()) {
        (ValueKind::Numeric, ValueKind::Numeric) => {
            let (a, b) = integers(register, floor)?;
            a.checked_sub(b)
                .map(Value::number)
                .ok_or_else(|| HrmError::overflow(format!("{} - {} does not fit", a, b)))
        }
        (ValueKind::Alphabetic, ValueKind::Alphabetic) => {
            let (a, b) = (letter_position(register)?, letter_position(floor)?);
            let diff = a - b;
            if diff < 1 {
                return Err(HrmError::overflow(format!(
                    "'{}' - '{}' falls before 'A'",
                    register, floor
                )));
            }
            letter_at(diff)
        }
        _ => Err(HrmError::math_domain(format!(
            "cannot subtract '{}' from '{}': operands must both be numbers or both be letters",
            floor, register
        ))),
    }
}

/// `tile + delta`, for BUMPUP (`1`) and BUMPDN (`-1`).
pub fn bump(tile: &Value, delta: i64) -> HrmResult<Value> {
    let n = tile.to_integer().ok_or_else(|| {
        HrmError::math_domain(format!("cannot bump '{}': not a number", tile))
    })?;
    n.checked_add(delta)
        .map(Value::number)
        .ok_or_else(|| HrmError::overflow(format!("bumping {} by {} does not fit", n, delta)))
}

fn integers(a: &Value, b: &Value) -> HrmResult<(i64, i64)> {
    match (a.to_integer(), b.to_integer()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(HrmError::math_domain(format!("'{}' or '{}' is not a number", a, b))),
    }
}

/// 1-based alphabet position, case-insensitive.
fn letter_position(value: &Value) -> HrmResult<i64> {
    value
        .to_letter()
        .map(|c| (c.to_ascii_uppercase() as u8 - b'A') as i64 + 1)
        .ok_or_else(|| HrmError::math_domain(format!("'{}' is not a letter", value)))
}

fn letter_at(position: i64) -> HrmResult<Value> {
    u8::try_from(position - 1)
        .ok()
        .filter(|offset| *offset < 26)
        .and_then(|offset| Value::letter((b'A' + offset) as char))
        .ok_or_else(|| HrmError::overflow(format!("no letter at position {}", position)))
}
