//! Interpreter for a small worker-and-floor assembly language.
//!
//! A program is parsed once into a validated [`Program`], then bound to an
//! inbox and floor as a [`Run`] and stepped until it runs off the end, takes
//! from an empty inbox, or fails.
//!
//! ```
//! use hrm_vm::{inbox_from_chars, Floor, Program};
//!
//! let program: Program = "a:\nINBOX\nOUTBOX\nJUMP a".parse()?;
//! let run = program.run(inbox_from_chars("HRM")?, Floor::empty())?;
//! assert_eq!(run.outbox().len(), 3);
//! # Ok::<(), hrm_vm::HrmError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Program (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod ast;
pub mod parser;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: VM (depends on core, program)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Cross-cutting
// ═══════════════════════════════════════════════════════════════════════════
pub mod audit;

pub use crate::core::{
    inbox_from_chars, inbox_from_tokens, ErrorCategory, Floor, FloorAddress, HrmError,
    HrmResult, SourceLocation, Value, ValueKind, FLOOR_SIZE,
};
pub use ast::{Instruction, InstructionKind, Program, Statement};
pub use parser::{parse, Parser};
pub use vm::{
    run_batch, BatchOutcome, Run, RunCase, RunConfig, RunSnapshot, RunStatus, Step, Termination,
};
