//! Execution engine.
//!
//! # Architecture
//!
//! - `run`: the `Run` state machine, its configuration and snapshots
//! - `arithmetic`: ADD/SUB/BUMP rules over numbers and letters
//! - `batch`: independent runs of one program, optionally on rayon
//!
//! A run starts `Ready`, becomes `Running` on its first step and ends either
//! `Finished` (end of program or empty inbox) or `Failed`.

pub mod arithmetic;
pub mod batch;
pub mod run;

pub use batch::{run_batch, BatchOutcome, RunCase};
pub use run::{Run, RunConfig, RunSnapshot, RunStatus, Step, Termination};
