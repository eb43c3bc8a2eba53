//! Core types for the interpreter.
//!
//! - **Address**: floor size and the two addressing modes
//! - **Value**: the legal contents of hands and tiles
//! - **Floor**: the 20-tile memory of a run
//! - **Error**: the unified error type
//!
//! # Layer 0 - No Internal Dependencies
//!
//! Nothing in here knows about instructions, programs or runs.

pub mod address;
pub mod error;
pub mod value;
pub mod floor;

pub use address::{FloorAddress, FLOOR_SIZE};
pub use error::{HrmError, HrmResult, ErrorCategory, SourceLocation};
pub use value::{Value, ValueKind, inbox_from_chars, inbox_from_tokens};
pub use floor::Floor;
