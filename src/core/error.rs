//! Unified error type for parsing, binding and running programs.
//!
//! # Error Categories
//!
//! - **Parse Errors**: detected while building a `Program`, before any run exists
//! - **Runtime Errors**: raised by an instruction while a `Run` executes
//! - **Binding Errors**: the inbox or floor handed to a run is malformed
//!
//! `EmptyInbox` is a runtime error internally, but the run loop turns it into
//! normal completion and it never reaches a caller of `Run::run`.

use std::fmt;

/// Where an error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Source line (1-indexed, 0 when unknown).
    pub line: usize,
    /// Position in the instruction list (0-indexed).
    pub instruction: Option<usize>,
}

impl SourceLocation {
    pub fn at_line(line: usize) -> Self {
        Self { line, instruction: None }
    }

    pub fn at(line: usize, instruction: usize) -> Self {
        Self { line, instruction: Some(instruction) }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.instruction) {
            (0, Some(i)) => write!(f, "instruction {}", i),
            (0, None) => write!(f, "?"),
            (line, Some(i)) => write!(f, "line {} (instruction {})", line, i),
            (line, None) => write!(f, "line {}", line),
        }
    }
}

/// Every failure the interpreter can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrmError {
    // ═══════════════════════════════════════════════════════════════════
    // Parse Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Leading keyword is not an instruction.
    NoSuchInstruction {
        keyword: String,
        location: SourceLocation,
    },

    /// A jump names a label that is never defined.
    InvalidJumpTarget {
        label: String,
        location: SourceLocation,
    },

    /// A literal floor index is outside the floor.
    InvalidFloorIndex {
        index: i64,
        location: SourceLocation,
    },

    /// Malformed or missing argument, undefined comment, unterminated block.
    InvalidArgument {
        instruction: String,
        message: String,
        location: SourceLocation,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Runtime Errors
    // ═══════════════════════════════════════════════════════════════════

    /// INBOX found nothing left to take.
    EmptyInbox {
        location: SourceLocation,
    },

    /// The instruction needs something in hands.
    EmptyHands {
        instruction: String,
        location: SourceLocation,
    },

    /// The instruction needs something on the tile.
    EmptyFloorTile {
        index: usize,
        location: SourceLocation,
    },

    /// A result does not fit the value domain.
    Overflow {
        message: String,
        location: SourceLocation,
    },

    /// Operands are not a legal combination for the operation.
    MathDomainError {
        message: String,
        location: SourceLocation,
    },

    /// A pointer tile holds an integer that is not a floor index.
    PointerOutOfRange {
        pointer: usize,
        target: i64,
        location: SourceLocation,
    },

    /// The configured instruction cap was reached.
    InstructionLimitExceeded {
        limit: u64,
        location: SourceLocation,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Binding Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Text that is neither an integer literal nor a single letter.
    InvalidValue {
        text: String,
    },

    /// Initial floor contents that do not fit the floor.
    InvalidFloorSeed {
        message: String,
    },
}

impl fmt::Display for HrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Parse Errors
            HrmError::NoSuchInstruction { keyword, location } => {
                write!(f, "[{}] No such instruction: '{}'", location, keyword)
            }
            HrmError::InvalidJumpTarget { label, location } => {
                write!(f, "[{}] Invalid jump target: '{}' is not a defined label", location, label)
            }
            HrmError::InvalidFloorIndex { index, location } => {
                write!(f, "[{}] Invalid floor index: {} (floor has tiles 0..{})",
                       location, index, super::address::FLOOR_SIZE)
            }
            HrmError::InvalidArgument { instruction, message, location } => {
                write!(f, "[{}] Invalid argument to {}: {}", location, instruction, message)
            }

            // Runtime Errors
            HrmError::EmptyInbox { location } => {
                write!(f, "[{}] Inbox is empty", location)
            }
            HrmError::EmptyHands { instruction, location } => {
                write!(f, "[{}] {} with empty hands", location, instruction)
            }
            HrmError::EmptyFloorTile { index, location } => {
                write!(f, "[{}] Floor tile {} is empty", location, index)
            }
            HrmError::Overflow { message, location } => {
                write!(f, "[{}] Overflow: {}", location, message)
            }
            HrmError::MathDomainError { message, location } => {
                write!(f, "[{}] Math domain error: {}", location, message)
            }
            HrmError::PointerOutOfRange { pointer, target, location } => {
                write!(f, "[{}] Tile {} points at {}, which is not a floor tile",
                       location, pointer, target)
            }
            HrmError::InstructionLimitExceeded { limit, location } => {
                write!(f, "[{}] Instruction limit exceeded: {} instructions", location, limit)
            }

            // Binding Errors
            HrmError::InvalidValue { text } => {
                write!(f, "Invalid value: '{}' is neither an integer nor a single letter", text)
            }
            HrmError::InvalidFloorSeed { message } => {
                write!(f, "Invalid initial floor: {}", message)
            }
        }
    }
}

impl std::error::Error for HrmError {}

impl HrmError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            HrmError::NoSuchInstruction { .. } |
            HrmError::InvalidJumpTarget { .. } |
            HrmError::InvalidFloorIndex { .. } |
            HrmError::InvalidArgument { .. } => ErrorCategory::Parse,

            HrmError::EmptyInbox { .. } |
            HrmError::EmptyHands { .. } |
            HrmError::EmptyFloorTile { .. } |
            HrmError::Overflow { .. } |
            HrmError::MathDomainError { .. } |
            HrmError::PointerOutOfRange { .. } |
            HrmError::InstructionLimitExceeded { .. } => ErrorCategory::Runtime,

            HrmError::InvalidValue { .. } |
            HrmError::InvalidFloorSeed { .. } => ErrorCategory::Binding,
        }
    }

    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            // Parse: 1000-1999
            HrmError::NoSuchInstruction { .. } => 1001,
            HrmError::InvalidJumpTarget { .. } => 1002,
            HrmError::InvalidFloorIndex { .. } => 1003,
            HrmError::InvalidArgument { .. } => 1004,

            // Runtime: 2000-2999
            HrmError::EmptyInbox { .. } => 2001,
            HrmError::EmptyHands { .. } => 2002,
            HrmError::EmptyFloorTile { .. } => 2003,
            HrmError::Overflow { .. } => 2004,
            HrmError::MathDomainError { .. } => 2005,
            HrmError::PointerOutOfRange { .. } => 2006,
            HrmError::InstructionLimitExceeded { .. } => 2007,

            // Binding: 3000-3999
            HrmError::InvalidValue { .. } => 3001,
            HrmError::InvalidFloorSeed { .. } => 3002,
        }
    }

    /// Get the source location if available.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            HrmError::NoSuchInstruction { location, .. } |
            HrmError::InvalidJumpTarget { location, .. } |
            HrmError::InvalidFloorIndex { location, .. } |
            HrmError::InvalidArgument { location, .. } |
            HrmError::EmptyInbox { location } |
            HrmError::EmptyHands { location, .. } |
            HrmError::EmptyFloorTile { location, .. } |
            HrmError::Overflow { location, .. } |
            HrmError::MathDomainError { location, .. } |
            HrmError::PointerOutOfRange { location, .. } |
            HrmError::InstructionLimitExceeded { location, .. } => Some(location),

            HrmError::InvalidValue { .. } |
            HrmError::InvalidFloorSeed { .. } => None,
        }
    }

    /// Replace the location of a located error.
    ///
    /// Instruction bodies raise errors without knowing where they sit in the
    /// program; the run loop stamps the location on the way out.
    pub fn at(mut self, loc: SourceLocation) -> Self {
        match &mut self {
            HrmError::NoSuchInstruction { location, .. } |
            HrmError::InvalidJumpTarget { location, .. } |
            HrmError::InvalidFloorIndex { location, .. } |
            HrmError::InvalidArgument { location, .. } |
            HrmError::EmptyInbox { location } |
            HrmError::EmptyHands { location, .. } |
            HrmError::EmptyFloorTile { location, .. } |
            HrmError::Overflow { location, .. } |
            HrmError::MathDomainError { location, .. } |
            HrmError::PointerOutOfRange { location, .. } |
            HrmError::InstructionLimitExceeded { location, .. } => *location = loc,

            HrmError::InvalidValue { .. } |
            HrmError::InvalidFloorSeed { .. } => {}
        }
        self
    }

    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }

    pub fn is_run_error(&self) -> bool {
        self.category() == ErrorCategory::Runtime
    }

    // Shorthand constructors for errors raised without a location yet.

    pub(crate) fn empty_hands(instruction: &str) -> Self {
        HrmError::EmptyHands {
            instruction: instruction.to_string(),
            location: SourceLocation::default(),
        }
    }

    pub(crate) fn empty_tile(index: usize) -> Self {
        HrmError::EmptyFloorTile { index, location: SourceLocation::default() }
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        HrmError::Overflow { message: message.into(), location: SourceLocation::default() }
    }

    pub(crate) fn math_domain(message: impl Into<String>) -> Self {
        HrmError::MathDomainError { message: message.into(), location: SourceLocation::default() }
    }

    pub(crate) fn invalid_argument(instruction: &str, message: impl Into<String>) -> Self {
        HrmError::InvalidArgument {
            instruction: instruction.to_string(),
            message: message.into(),
            location: SourceLocation::default(),
        }
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Runtime,
    Binding,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Parse => write!(f, "parse"),
            ErrorCategory::Runtime => write!(f, "runtime"),
            ErrorCategory::Binding => write!(f, "binding"),
        }
    }
}

/// Result type alias for interpreter operations.
pub type HrmResult<T> = Result<T, HrmError>;
