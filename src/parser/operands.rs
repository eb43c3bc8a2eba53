//! Argument parsing for instruction operands.
//!
//! Handles floor addresses (`7`, `[7]`), jump labels and the small integer
//! ids used by comment directives. Range checks are left to validation.

use crate::ast::InstructionKind;
use crate::core::{FloorAddress, HrmError, HrmResult};

/// Require exactly `N` arguments for `kind`.
pub fn expect_args<'a, const N: usize>(
    kind: InstructionKind,
    args: &[&'a str],
) -> HrmResult<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| {
        let wanted = match N {
            0 => "no arguments".to_string(),
            1 => "exactly one argument".to_string(),
            n => format!("exactly {} arguments", n),
        };
        HrmError::invalid_argument(
            kind.mnemonic(),
            format!("expected {}, found {}", wanted, args.len()),
        )
    })
}

/// Parse a floor address: a bare integer, or an integer in square brackets.
pub fn parse_address(kind: InstructionKind, token: &str) -> HrmResult<FloorAddress> {
    match token.strip_prefix('[') {
        Some(rest) => {
            let inner = rest.strip_suffix(']').ok_or_else(|| {
                HrmError::invalid_argument(
                    kind.mnemonic(),
                    format!("unclosed pointer address '{}'", token),
                )
            })?;
            Ok(FloorAddress::Pointer(parse_integer(kind, inner.trim())?))
        }
        None => Ok(FloorAddress::Direct(parse_integer(kind, token)?)),
    }
}

/// Parse a signed integer literal.
pub fn parse_integer(kind: InstructionKind, token: &str) -> HrmResult<i64> {
    token.parse::<i64>().map_err(|_| {
        HrmError::invalid_argument(kind.mnemonic(), format!("'{}' is not an integer", token))
    })
}

/// Parse a non-negative id, as used by `COMMENT` and `DEFINE COMMENT`.
pub fn parse_id(kind: InstructionKind, token: &str) -> HrmResult<u32> {
    token.parse::<u32>().map_err(|_| {
        HrmError::invalid_argument(
            kind.mnemonic(),
            format!("'{}' is not a non-negative integer", token),
        )
    })
}
