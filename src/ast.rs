//! Instruction catalog and compiled program.
//!
//! Every instruction kind is one variant of `Instruction`. Parse-time checks
//! live in `Instruction::validate` and run-time behaviour in the executor's
//! single `match`, so adding a kind forces both to handle it.

use std::collections::BTreeMap;
use std::fmt;

use crate::core::{FloorAddress, HrmError, HrmResult, SourceLocation};
use crate::core::address::tile_index;

/// Instruction kinds, without their arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Inbox,
    Outbox,
    Jump,
    JumpZ,
    JumpN,
    CopyFrom,
    CopyTo,
    Add,
    Sub,
    BumpUp,
    BumpDn,
    Comment,
    DefineComment,
    DefineLabel,
}

impl InstructionKind {
    /// Canonical uppercase keyword.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            InstructionKind::Inbox => "INBOX",
            InstructionKind::Outbox => "OUTBOX",
            InstructionKind::Jump => "JUMP",
            InstructionKind::JumpZ => "JUMPZ",
            InstructionKind::JumpN => "JUMPN",
            InstructionKind::CopyFrom => "COPYFROM",
            InstructionKind::CopyTo => "COPYTO",
            InstructionKind::Add => "ADD",
            InstructionKind::Sub => "SUB",
            InstructionKind::BumpUp => "BUMPUP",
            InstructionKind::BumpDn => "BUMPDN",
            InstructionKind::Comment => "COMMENT",
            InstructionKind::DefineComment => "DEFINE COMMENT",
            InstructionKind::DefineLabel => "DEFINE LABEL",
        }
    }

    /// Annotations that never touch run state and are not counted as executed.
    pub fn is_no_op(&self) -> bool {
        matches!(
            self,
            InstructionKind::Comment | InstructionKind::DefineComment | InstructionKind::DefineLabel
        )
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One instruction with its parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Take the front of the inbox into hands.
    Inbox,
    /// Put hands on the back of the outbox, leaving hands empty.
    Outbox,
    /// Continue at a label.
    Jump(String),
    /// Continue at a label if hands hold exactly `0`.
    JumpZ(String),
    /// Continue at a label if hands hold a negative integer.
    JumpN(String),
    /// Copy a tile into hands.
    CopyFrom(FloorAddress),
    /// Copy hands onto a tile.
    CopyTo(FloorAddress),
    /// hands = hands + tile.
    Add(FloorAddress),
    /// hands = hands - tile.
    Sub(FloorAddress),
    /// tile = tile + 1, then copy to hands.
    BumpUp(FloorAddress),
    /// tile = tile - 1, then copy to hands.
    BumpDn(FloorAddress),
    /// Reference to a `DEFINE COMMENT` block.
    Comment(u32),
    /// Comment text block, captured at parse time.
    DefineComment(u32),
    /// Tile label text block, captured at parse time.
    DefineLabel(i64),
}

impl Instruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            Instruction::Inbox => InstructionKind::Inbox,
            Instruction::Outbox => InstructionKind::Outbox,
            Instruction::Jump(_) => InstructionKind::Jump,
            Instruction::JumpZ(_) => InstructionKind::JumpZ,
            Instruction::JumpN(_) => InstructionKind::JumpN,
            Instruction::CopyFrom(_) => InstructionKind::CopyFrom,
            Instruction::CopyTo(_) => InstructionKind::CopyTo,
            Instruction::Add(_) => InstructionKind::Add,
            Instruction::Sub(_) => InstructionKind::Sub,
            Instruction::BumpUp(_) => InstructionKind::BumpUp,
            Instruction::BumpDn(_) => InstructionKind::BumpDn,
            Instruction::Comment(_) => InstructionKind::Comment,
            Instruction::DefineComment(_) => InstructionKind::DefineComment,
            Instruction::DefineLabel(_) => InstructionKind::DefineLabel,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.kind().mnemonic()
    }

    pub fn is_no_op(&self) -> bool {
        self.kind().is_no_op()
    }

    /// The label a jump-family instruction names.
    pub fn jump_label(&self) -> Option<&str> {
        match self {
            Instruction::Jump(l) | Instruction::JumpZ(l) | Instruction::JumpN(l) => Some(l),
            _ => None,
        }
    }

    /// The floor address a floor-family instruction uses.
    pub fn floor_address(&self) -> Option<FloorAddress> {
        match self {
            Instruction::CopyFrom(a)
            | Instruction::CopyTo(a)
            | Instruction::Add(a)
            | Instruction::Sub(a)
            | Instruction::BumpUp(a)
            | Instruction::BumpDn(a) => Some(*a),
            _ => None,
        }
    }

    /// Check this instruction against the finished program.
    ///
    /// Pure: reads the label and comment tables, never changes anything, so
    /// calling it again on a valid program is always `Ok`.
    pub fn validate(&self, program: &Program) -> HrmResult<()> {
        match self {
            Instruction::Inbox | Instruction::Outbox | Instruction::DefineComment(_) => Ok(()),

            Instruction::Jump(label) | Instruction::JumpZ(label) | Instruction::JumpN(label) => {
                if program.jump_target(label).is_some() {
                    Ok(())
                } else {
                    Err(HrmError::InvalidJumpTarget {
                        label: label.clone(),
                        location: SourceLocation::default(),
                    })
                }
            }

            // Only the literal is checked here; what a pointer tile holds is
            // run state and is checked on access.
            Instruction::CopyFrom(address)
            | Instruction::CopyTo(address)
            | Instruction::Add(address)
            | Instruction::Sub(address)
            | Instruction::BumpUp(address)
            | Instruction::BumpDn(address) => check_floor_index(address.literal()),

            Instruction::DefineLabel(index) => check_floor_index(*index),

            Instruction::Comment(id) => {
                if program.comment(*id).is_some() {
                    Ok(())
                } else {
                    Err(HrmError::invalid_argument(
                        self.mnemonic(),
                        format!("comment {} is never defined", id),
                    ))
                }
            }
        }
    }
}

fn check_floor_index(index: i64) -> HrmResult<()> {
    match tile_index(index) {
        Some(_) => Ok(()),
        None => Err(HrmError::InvalidFloorIndex {
            index,
            location: SourceLocation::default(),
        }),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Inbox | Instruction::Outbox => f.write_str(self.mnemonic()),
            Instruction::Jump(l) | Instruction::JumpZ(l) | Instruction::JumpN(l) => {
                write!(f, "{} {}", self.mnemonic(), l)
            }
            Instruction::CopyFrom(a)
            | Instruction::CopyTo(a)
            | Instruction::Add(a)
            | Instruction::Sub(a)
            | Instruction::BumpUp(a)
            | Instruction::BumpDn(a) => write!(f, "{} {}", self.mnemonic(), a),
            Instruction::Comment(id) | Instruction::DefineComment(id) => {
                write!(f, "{} {}", self.mnemonic(), id)
            }
            Instruction::DefineLabel(index) => write!(f, "{} {}", self.mnemonic(), index),
        }
    }
}

/// An instruction together with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub instruction: Instruction,
    /// Source line (1-indexed).
    pub line: usize,
}

/// A compiled, validated program. Immutable once built; bind it to as many
/// runs as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub(crate) statements: Vec<Statement>,
    /// Label letter -> index of the instruction that follows the label.
    pub(crate) jump_targets: BTreeMap<char, usize>,
    /// `DEFINE COMMENT` texts.
    pub(crate) comments: BTreeMap<u32, String>,
    /// `DEFINE LABEL` texts, keyed by floor index.
    pub(crate) label_texts: BTreeMap<i64, String>,
}

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.statements.iter().map(|s| &s.instruction)
    }

    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.statements.get(index).map(|s| &s.instruction)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Where a label points. Labels are single lowercase letters, so any
    /// other name resolves to nothing.
    pub fn jump_target(&self, label: &str) -> Option<usize> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.jump_targets.get(&c).copied(),
            _ => None,
        }
    }

    pub fn jump_targets(&self) -> &BTreeMap<char, usize> {
        &self.jump_targets
    }

    pub fn comment(&self, id: u32) -> Option<&str> {
        self.comments.get(&id).map(String::as_str)
    }

    pub fn comments(&self) -> &BTreeMap<u32, String> {
        &self.comments
    }

    pub fn label_text(&self, index: i64) -> Option<&str> {
        self.label_texts.get(&index).map(String::as_str)
    }

    pub fn label_texts(&self) -> &BTreeMap<i64, String> {
        &self.label_texts
    }

    /// Location of the instruction at `index`, for error reporting.
    pub fn location(&self, index: usize) -> SourceLocation {
        let line = self.statements.get(index).map(|s| s.line).unwrap_or(0);
        SourceLocation::at(line, index)
    }

    /// Run every instruction's check, in order, against this program.
    pub fn validate(&self) -> HrmResult<()> {
        for (index, stmt) in self.statements.iter().enumerate() {
            stmt.instruction
                .validate(self)
                .map_err(|e| e.at(self.location(index)))?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    /// Render back to source form, labels included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..=self.statements.len() {
            for (label, _) in self.jump_targets.iter().filter(|(_, t)| **t == index) {
                writeln!(f, "{}:", label)?;
            }
            let Some(stmt) = self.statements.get(index) else { break };
            writeln!(f, "    {}", stmt.instruction)?;
            let text = match &stmt.instruction {
                Instruction::DefineComment(id) => self.comment(*id),
                Instruction::DefineLabel(i) => self.label_text(*i),
                _ => None,
            };
            if let Some(text) = text {
                writeln!(f, "{};", text)?;
            }
        }
        Ok(())
    }
}
