//! The floor: a fixed row of FLOOR_SIZE tiles, each empty or holding a Value.
//!
//! A fresh floor is created for every run, optionally seeded from a dense
//! list or a sparse index -> value mapping. Addressing goes through
//! `resolve`, which turns a direct or pointer address into a tile index.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::address::{tile_index, FloorAddress, FLOOR_SIZE};
use super::error::{HrmError, HrmResult, SourceLocation};
use super::value::Value;

/// The tiles of one run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    tiles: [Option<Value>; FLOOR_SIZE],
}

impl Default for Floor {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show occupied tiles
        let occupied: Vec<_> = self.occupied().collect();
        if occupied.is_empty() {
            write!(f, "Floor{{all empty}}")
        } else {
            write!(f, "Floor{{")?;
            for (i, (index, value)) in occupied.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "[{}]={}", index, value)?;
            }
            write!(f, "}}")
        }
    }
}

impl Floor {
    /// A floor with every tile empty.
    pub fn empty() -> Self {
        Self { tiles: std::array::from_fn(|_| None) }
    }

    /// Seed from a dense list of tiles, index 0 first.
    ///
    /// Shorter lists leave the remaining tiles empty.
    pub fn from_dense(tiles: Vec<Option<Value>>) -> HrmResult<Self> {
        if tiles.len() > FLOOR_SIZE {
            return Err(HrmError::InvalidFloorSeed {
                message: format!("{} tiles given, the floor has {}", tiles.len(), FLOOR_SIZE),
            });
        }
        let mut floor = Self::empty();
        for (slot, value) in floor.tiles.iter_mut().zip(tiles) {
            *slot = value;
        }
        Ok(floor)
    }

    /// Seed from sparse `(index, value)` pairs. Later pairs win.
    pub fn from_sparse<I>(pairs: I) -> HrmResult<Self>
    where
        I: IntoIterator<Item = (usize, Value)>,
    {
        let mut floor = Self::empty();
        for (index, value) in pairs {
            if index >= FLOOR_SIZE {
                return Err(HrmError::InvalidFloorSeed {
                    message: format!("tile {} is outside 0..{}", index, FLOOR_SIZE),
                });
            }
            floor.tiles[index] = Some(value);
        }
        Ok(floor)
    }

    /// Read a tile. `index` must already be resolved.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.tiles.get(index).and_then(Option::as_ref)
    }

    /// Overwrite a tile. `index` must already be resolved.
    pub fn set(&mut self, index: usize, value: Value) {
        self.tiles[index] = Some(value);
    }

    pub fn tiles(&self) -> &[Option<Value>] {
        &self.tiles
    }

    /// Occupied tiles in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|v| (i, v)))
    }

    /// Turn an address into a tile index.
    ///
    /// Direct addresses are checked against the floor bounds. A pointer
    /// address reads its tile, which must hold an in-range integer; the
    /// contents are consulted on every call.
    pub fn resolve(&self, address: FloorAddress) -> HrmResult<usize> {
        match address {
            FloorAddress::Direct(index) => tile_index(index).ok_or(HrmError::InvalidFloorIndex {
                index,
                location: SourceLocation::default(),
            }),
            FloorAddress::Pointer(index) => {
                let pointer = tile_index(index).ok_or(HrmError::InvalidFloorIndex {
                    index,
                    location: SourceLocation::default(),
                })?;
                let held = self.get(pointer).ok_or_else(|| HrmError::empty_tile(pointer))?;
                let target = held.to_integer().ok_or_else(|| {
                    HrmError::math_domain(format!(
                        "tile {} holds '{}', which cannot be used as a floor index",
                        pointer, held
                    ))
                })?;
                tile_index(target).ok_or(HrmError::PointerOutOfRange {
                    pointer,
                    target,
                    location: SourceLocation::default(),
                })
            }
        }
    }
}
