//! Many independent runs of one program.
//!
//! Programs are immutable and runs own their state, so cases can execute on
//! any thread. With the `parallel` feature the cases are spread over the
//! rayon pool; without it they run in order. Results are identical and come
//! back in case order either way.

use crate::ast::Program;
use crate::core::{Floor, HrmError, Value};

use super::run::{RunConfig, RunSnapshot, Termination};

/// Inputs for one run.
#[derive(Debug, Clone, Default)]
pub struct RunCase {
    pub inbox: Vec<Value>,
    pub floor: Floor,
    pub config: RunConfig,
}

impl RunCase {
    pub fn new(inbox: Vec<Value>, floor: Floor) -> Self {
        Self { inbox, floor, config: RunConfig::default() }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}

/// What one case produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Final state, whether the run finished or failed.
    pub snapshot: RunSnapshot,
    /// `Ok` with how the run stopped, or the error that failed it.
    pub result: Result<Termination, HrmError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn execute_case(program: &Program, case: &RunCase) -> BatchOutcome {
    let mut run = program.bind_with_config(case.inbox.clone(), case.floor.clone(), case.config.clone());
    let result = run.run();
    BatchOutcome { snapshot: run.snapshot(), result }
}

/// Run every case against `program`.
#[cfg(feature = "parallel")]
pub fn run_batch(program: &Program, cases: &[RunCase]) -> Vec<BatchOutcome> {
    use rayon::prelude::*;

    cases.par_iter().map(|case| execute_case(program, case)).collect()
}

/// Run every case against `program`.
#[cfg(not(feature = "parallel"))]
pub fn run_batch(program: &Program, cases: &[RunCase]) -> Vec<BatchOutcome> {
    cases.iter().map(|case| execute_case(program, case)).collect()
}
