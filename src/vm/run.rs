//! One execution of a program.
//!
//! A `Run` borrows its `Program` and owns everything that changes: program
//! counter, executed-instruction counter, hands, floor, inbox and outbox.
//! Many runs can share one program; a run never mutates it.
//!
//! Each `step` fetches the instruction at the program counter and executes
//! it. Running off the end of the list finishes the run; so does `INBOX` on
//! an empty inbox, which is how well-formed programs normally stop. Any other
//! error fails the run and leaves its state exactly as the failing
//! instruction left it.

use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ast::{Instruction, Program};
use crate::audit::{self, ActionCategory, AuditEntry, Outcome, Severity};
use crate::core::{Floor, FloorAddress, HrmError, HrmResult, SourceLocation, Value};

use super::arithmetic;

// ═══════════════════════════════════════════════════════════════════════════
// Configuration and status
// ═══════════════════════════════════════════════════════════════════════════

/// Per-run settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Fail with `InstructionLimitExceeded` once this many instructions have
    /// executed. `None` runs until the program stops on its own.
    pub max_instructions: Option<u64>,
    /// Emit a Debug audit entry per executed instruction.
    pub trace: bool,
}

impl RunConfig {
    pub fn with_max_instructions(mut self, limit: u64) -> Self {
        self.max_instructions = Some(limit);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Why a run stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The program counter moved past the last instruction.
    EndOfProgram,
    /// `INBOX` found the inbox empty.
    InboxExhausted,
}

/// Result of a single `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted(Termination),
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Bound, nothing executed yet.
    Ready,
    Running,
    Finished(Termination),
    Failed,
}

/// Outcome of executing one instruction.
enum Flow {
    Next,
    Jump(usize),
}

// ═══════════════════════════════════════════════════════════════════════════
// Run
// ═══════════════════════════════════════════════════════════════════════════

/// Mutable execution state bound to one program.
#[derive(Debug, Clone)]
pub struct Run<'p> {
    program: &'p Program,
    config: RunConfig,
    pc: usize,
    executed: u64,
    hands: Option<Value>,
    floor: Floor,
    inbox: VecDeque<Value>,
    outbox: Vec<Value>,
    status: RunStatus,
    error: Option<HrmError>,
    started: Option<Instant>,
}

impl Program {
    /// Bind this program to an inbox and a starting floor.
    pub fn bind(&self, inbox: Vec<Value>, floor: Floor) -> Run<'_> {
        self.bind_with_config(inbox, floor, RunConfig::default())
    }

    pub fn bind_with_config(&self, inbox: Vec<Value>, floor: Floor, config: RunConfig) -> Run<'_> {
        Run::new(self, inbox, floor, config)
    }

    /// Bind and run to completion.
    ///
    /// On error the run's state is dropped; bind and call `Run::run` directly
    /// to inspect it.
    pub fn run(&self, inbox: Vec<Value>, floor: Floor) -> HrmResult<Run<'_>> {
        let mut run = self.bind(inbox, floor);
        run.run()?;
        Ok(run)
    }
}

impl<'p> Run<'p> {
    pub fn new(program: &'p Program, inbox: Vec<Value>, floor: Floor, config: RunConfig) -> Self {
        audit::audit(
            AuditEntry::new("BIND", "Run", "-", "Run bound")
                .with_category(ActionCategory::Bind)
                .with_meta("instructions", program.len().to_string())
                .with_meta("inbox", inbox.len().to_string())
                .with_meta("floor", floor.occupied().count().to_string()),
        );

        Self {
            program,
            config,
            pc: 0,
            executed: 0,
            hands: None,
            floor,
            inbox: inbox.into(),
            outbox: Vec::new(),
            status: RunStatus::Ready,
            error: None,
            started: None,
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Driving
    // ───────────────────────────────────────────────────────────────────────

    /// Step until the run stops.
    pub fn run(&mut self) -> HrmResult<Termination> {
        loop {
            if let Step::Halted(termination) = self.step()? {
                return Ok(termination);
            }
        }
    }

    /// Execute exactly one instruction.
    ///
    /// Stepping a finished run reports the same termination again; stepping a
    /// failed run returns the same error again.
    pub fn step(&mut self) -> HrmResult<Step> {
        match self.status {
            RunStatus::Finished(termination) => return Ok(Step::Halted(termination)),
            RunStatus::Failed => {
                return Err(self.error.clone().unwrap_or(HrmError::InvalidArgument {
                    instruction: "STEP".to_string(),
                    message: "run has already failed".to_string(),
                    location: SourceLocation::default(),
                }))
            }
            RunStatus::Ready => {
                self.status = RunStatus::Running;
                self.started = Some(Instant::now());
            }
            RunStatus::Running => {}
        }

        let program = self.program;
        let Some(instruction) = program.instruction(self.pc) else {
            return Ok(self.finish(Termination::EndOfProgram));
        };

        // INBOX on an empty inbox ends the run normally, even at the cap.
        let exhausts_inbox = matches!(instruction, Instruction::Inbox) && self.inbox.is_empty();
        if let Some(limit) = self.config.max_instructions {
            if self.executed >= limit && !instruction.is_no_op() && !exhausts_inbox {
                let err = HrmError::InstructionLimitExceeded {
                    limit,
                    location: SourceLocation::default(),
                };
                return Err(self.fail(err));
            }
        }

        match self.execute(instruction) {
            Ok(flow) => {
                if !instruction.is_no_op() {
                    if self.config.trace {
                        self.trace(instruction);
                    }
                    self.executed += 1;
                }
                self.pc = match flow {
                    Flow::Next => self.pc + 1,
                    Flow::Jump(target) => target,
                };
                Ok(Step::Continue)
            }
            Err(HrmError::EmptyInbox { .. }) => Ok(self.finish(Termination::InboxExhausted)),
            Err(err) => Err(self.fail(err)),
        }
    }

    fn finish(&mut self, termination: Termination) -> Step {
        self.status = RunStatus::Finished(termination);
        audit::audit(
            AuditEntry::new("FINISH", "Run", self.pc.to_string(), format!("{:?}", termination))
                .with_category(ActionCategory::Execute)
                .with_duration_us(self.elapsed_us())
                .with_meta("executed", self.executed.to_string())
                .with_meta("outbox", self.outbox.len().to_string()),
        );
        Step::Halted(termination)
    }

    fn fail(&mut self, err: HrmError) -> HrmError {
        let err = err.at(self.program.location(self.pc));
        self.status = RunStatus::Failed;
        self.error = Some(err.clone());
        audit::audit(
            AuditEntry::new("FAIL", "Run", self.pc.to_string(), err.to_string())
                .with_category(ActionCategory::Execute)
                .with_severity(Severity::Error)
                .with_outcome(Outcome::Failure)
                .with_duration_us(self.elapsed_us())
                .with_meta("code", err.code().to_string())
                .with_meta("executed", self.executed.to_string()),
        );
        err
    }

    fn trace(&self, instruction: &Instruction) {
        if !audit::enabled(Severity::Debug) {
            return;
        }
        let hands = self.hands.as_ref().map(Value::to_string).unwrap_or_default();
        audit::audit(
            AuditEntry::new("STEP", "Run", self.pc.to_string(), instruction.to_string())
                .with_category(ActionCategory::Execute)
                .with_severity(Severity::Debug)
                .with_meta("hands", hands)
                .with_meta("executed", self.executed.to_string()),
        );
    }

    fn elapsed_us(&self) -> u64 {
        self.started.map(|t| t.elapsed().as_micros() as u64).unwrap_or(0)
    }

    // ───────────────────────────────────────────────────────────────────────
    // Instruction bodies
    // ───────────────────────────────────────────────────────────────────────

    fn execute(&mut self, instruction: &Instruction) -> HrmResult<Flow> {
        let mnemonic = instruction.mnemonic();
        match instruction {
            Instruction::Inbox => {
                let value = self.inbox.pop_front().ok_or(HrmError::EmptyInbox {
                    location: SourceLocation::default(),
                })?;
                self.hands = Some(value);
            }
            Instruction::Outbox => {
                let value = self.hands.take().ok_or_else(|| HrmError::empty_hands(mnemonic))?;
                self.outbox.push(value);
            }

            Instruction::Jump(label) => return self.jump_to(label),
            Instruction::JumpZ(label) => {
                if self.require_hands(mnemonic)?.is_zero_literal() {
                    return self.jump_to(label);
                }
            }
            Instruction::JumpN(label) => {
                // Letters never count as negative.
                if self.require_hands(mnemonic)?.to_integer().is_some_and(|n| n < 0) {
                    return self.jump_to(label);
                }
            }

            Instruction::CopyFrom(address) => {
                self.hands = None;
                let value = self.read_tile(*address)?.clone();
                self.hands = Some(value);
            }
            Instruction::CopyTo(address) => {
                let value = self.require_hands(mnemonic)?.clone();
                let index = self.floor.resolve(*address)?;
                self.floor.set(index, value);
            }

            Instruction::Add(address) => {
                let register = self.require_hands(mnemonic)?;
                let result = arithmetic::add(register, self.read_tile(*address)?)?;
                self.hands = Some(result);
            }
            Instruction::Sub(address) => {
                let register = self.require_hands(mnemonic)?;
                let result = arithmetic::sub(register, self.read_tile(*address)?)?;
                self.hands = Some(result);
            }

            Instruction::BumpUp(address) => self.bump(*address, 1)?,
            Instruction::BumpDn(address) => self.bump(*address, -1)?,

            Instruction::Comment(_) | Instruction::DefineComment(_) | Instruction::DefineLabel(_) => {}
        }
        Ok(Flow::Next)
    }

    fn jump_to(&self, label: &str) -> HrmResult<Flow> {
        // Validation guarantees the label; a hand-built program may not.
        self.program
            .jump_target(label)
            .map(Flow::Jump)
            .ok_or_else(|| HrmError::InvalidJumpTarget {
                label: label.to_string(),
                location: SourceLocation::default(),
            })
    }

    fn require_hands(&self, mnemonic: &str) -> HrmResult<&Value> {
        self.hands.as_ref().ok_or_else(|| HrmError::empty_hands(mnemonic))
    }

    fn read_tile(&self, address: FloorAddress) -> HrmResult<&Value> {
        let index = self.floor.resolve(address)?;
        self.floor.get(index).ok_or_else(|| HrmError::empty_tile(index))
    }

    fn bump(&mut self, address: FloorAddress, delta: i64) -> HrmResult<()> {
        let index = self.floor.resolve(address)?;
        let tile = self.floor.get(index).ok_or_else(|| HrmError::empty_tile(index))?;
        let bumped = arithmetic::bump(tile, delta)?;
        self.floor.set(index, bumped.clone());
        self.hands = Some(bumped);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────
    // Inspection
    // ───────────────────────────────────────────────────────────────────────

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Index of the next instruction to execute.
    pub fn program_counter(&self) -> usize {
        self.pc
    }

    /// Instructions executed so far; no-ops are not counted.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    pub fn hands(&self) -> Option<&Value> {
        self.hands.as_ref()
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn inbox(&self) -> &VecDeque<Value> {
        &self.inbox
    }

    pub fn outbox(&self) -> &[Value] {
        &self.outbox
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The error that failed this run, if it failed.
    pub fn error(&self) -> Option<&HrmError> {
        self.error.as_ref()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            program_counter: self.pc,
            executed: self.executed,
            hands: self.hands.clone(),
            floor: self.floor.clone(),
            inbox: self.inbox.iter().cloned().collect(),
            outbox: self.outbox.clone(),
            status: self.status,
            error: self.error.as_ref().map(HrmError::to_string),
        }
    }
}

/// Owned copy of a run's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub program_counter: usize,
    pub executed: u64,
    pub hands: Option<Value>,
    pub floor: Floor,
    pub inbox: Vec<Value>,
    pub outbox: Vec<Value>,
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
