//! Shared test utilities for the integration tests.
//!
//! ## AAA Pattern
//!
//! All tests follow the Arrange-Act-Assert pattern:
//! - Arrange: program text, inbox and starting floor
//! - Act: parse and run
//! - Assert: outbox, floor, counters or the error raised

#![allow(dead_code)]

use hrm_vm::*;

// =============================================================================
// Program Parsing Utilities
// =============================================================================

/// Parse program text.
///
/// # Panics
/// Panics if parsing fails, which is appropriate for test code.
pub fn parse_program(code: &str) -> Program {
    Program::parse(code).expect("Failed to parse program")
}

/// Parse program text, returning the error if any.
pub fn try_parse(code: &str) -> Result<Program, HrmError> {
    Program::parse(code)
}

// =============================================================================
// Input Builders
// =============================================================================

/// One value per character: `"AB1"` is `A`, `B`, `1`.
pub fn chars(s: &str) -> Vec<Value> {
    inbox_from_chars(s).expect("Invalid inbox")
}

/// Pre-tokenized values, for multi-digit and negative numbers.
pub fn values(tokens: &[&str]) -> Vec<Value> {
    inbox_from_tokens(tokens).expect("Invalid inbox")
}

/// A floor seeded from `(index, value)` pairs.
pub fn floor(pairs: &[(usize, &str)]) -> Floor {
    Floor::from_sparse(pairs.iter().map(|(i, v)| (*i, Value::parse(v).expect("Invalid tile"))))
        .expect("Invalid floor")
}

// =============================================================================
// Execution Helpers
// =============================================================================

/// Parse and run to normal termination, returning the final state.
pub fn run(code: &str, inbox: Vec<Value>, start: Floor) -> RunSnapshot {
    let program = parse_program(code);
    let mut run = program.bind(inbox, start);
    run.run().expect("Run failed");
    run.snapshot()
}

/// Parse and run, expecting a run-time error. Returns it with the state so far.
pub fn run_err(code: &str, inbox: Vec<Value>, start: Floor) -> (HrmError, RunSnapshot) {
    let program = parse_program(code);
    let mut run = program.bind(inbox, start);
    let err = run.run().expect_err("Expected the run to fail");
    (err, run.snapshot())
}

// =============================================================================
// Assertion Helpers
// =============================================================================

/// Assert the outbox, value by value.
pub fn assert_outbox(snapshot: &RunSnapshot, expected: &[&str]) {
    let actual: Vec<&str> = snapshot.outbox.iter().map(Value::as_str).collect();
    assert_eq!(actual, expected, "outbox mismatch");
}

/// Assert what is in hands.
pub fn assert_hands(snapshot: &RunSnapshot, expected: Option<&str>) {
    assert_eq!(snapshot.hands.as_ref().map(Value::as_str), expected, "hands mismatch");
}

/// Assert a single floor tile.
pub fn assert_tile(snapshot: &RunSnapshot, index: usize, expected: Option<&str>) {
    assert_eq!(
        snapshot.floor.get(index).map(Value::as_str),
        expected,
        "tile {} mismatch",
        index
    );
}
