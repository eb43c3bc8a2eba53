//! Integration tests, organised by concern.

pub mod levels;
pub mod errors;
pub mod addressing;
