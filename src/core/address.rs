//! Floor address types and constants.
//!
//! Separated out so that `floor`, `error` and the instruction catalog can all
//! name an address without depending on each other.

use std::fmt;

/// Number of tiles on the floor. Every run has exactly this many slots.
pub const FLOOR_SIZE: usize = 20;

/// How an instruction reaches a floor tile.
///
/// The mode is fixed when the program text is parsed. A pointer address is
/// re-resolved through the contents of its slot on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloorAddress {
    /// `COPYFROM 3`: the literal index names the tile.
    Direct(i64),
    /// `COPYFROM [3]`: tile 3 holds the index of the tile to use.
    Pointer(i64),
}

impl FloorAddress {
    /// The literal index written in the program, regardless of mode.
    pub fn literal(&self) -> i64 {
        match self {
            FloorAddress::Direct(i) | FloorAddress::Pointer(i) => *i,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, FloorAddress::Pointer(_))
    }
}

impl fmt::Display for FloorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorAddress::Direct(i) => write!(f, "{}", i),
            FloorAddress::Pointer(i) => write!(f, "[{}]", i),
        }
    }
}

/// Convert a signed literal into a usable tile index, if it is on the floor.
#[inline]
pub fn tile_index(index: i64) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < FLOOR_SIZE)
}
