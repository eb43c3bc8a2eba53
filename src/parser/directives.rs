//! Multi-line directives: `DEFINE COMMENT n` and `DEFINE LABEL n`.
//!
//! The directive line is followed by raw data lines, concatenated after
//! trimming, up to and including the first line that ends in `;`. The text
//! is captured during the line scan so that validation, which runs after the
//! scan, already sees every block.

use crate::ast::InstructionKind;
use crate::core::{HrmError, HrmResult};

/// Terminates a directive's data block.
pub const BLOCK_TERMINATOR: char = ';';

/// Consume data lines for `kind` from `lines` and return the joined text.
pub fn consume_block<'a, I>(kind: InstructionKind, lines: &mut I) -> HrmResult<String>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut text = String::new();
    for (_, raw) in lines {
        let line = raw.trim();
        if let Some(last) = line.strip_suffix(BLOCK_TERMINATOR) {
            text.push_str(last);
            return Ok(text);
        }
        text.push_str(line);
    }
    Err(HrmError::invalid_argument(
        kind.mnemonic(),
        format!("data block is not terminated by '{}'", BLOCK_TERMINATOR),
    ))
}
