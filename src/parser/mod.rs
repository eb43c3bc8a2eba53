//! Line-oriented parser.
//!
//! Syntax, one item per line, surrounding whitespace ignored:
//! - Blank lines and lines starting with `--` are skipped
//! - `a:` (one lowercase letter and a colon) defines a jump label
//! - Anything else is `KEYWORD args...`, keywords case-insensitive
//! - `DEFINE COMMENT n` / `DEFINE LABEL n` swallow following lines up to `;`
//!
//! # Architecture
//!
//! - `keyword_map`: keyword -> instruction kind lookup
//! - `operands`: address, label and id arguments
//! - `directives`: continuation-line capture for the DEFINE forms
//!
//! Parsing is two passes. The line scan builds the instruction list and fills
//! the label and text tables; then every instruction is validated against the
//! completed program.

pub mod keyword_map;
pub mod operands;
pub mod directives;

use std::str::FromStr;
use std::time::Instant;

use crate::ast::{Instruction, InstructionKind, Program, Statement};
use crate::audit::{self, ActionCategory, AuditEntry, Outcome, Severity};
use crate::core::{HrmError, HrmResult, SourceLocation};

use operands::{expect_args, parse_address, parse_id, parse_integer};

/// Prefix of a whole-line comment.
pub const LINE_COMMENT: &str = "--";

/// Parse program text into a validated program.
pub fn parse(source: &str) -> HrmResult<Program> {
    Parser::new(source).parse_program()
}

/// Scanner over the lines of one program text.
pub struct Parser<'src> {
    lines: std::iter::Enumerate<std::str::Lines<'src>>,
    program: Program,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            program: Program::default(),
        }
    }

    /// Scan every line, then validate. Consumes the parser.
    pub fn parse_program(mut self) -> HrmResult<Program> {
        let start = Instant::now();
        let result = self.scan().and_then(|()| {
            self.program.validate()?;
            Ok(self.program)
        });

        let elapsed = start.elapsed().as_micros() as u64;
        match &result {
            Ok(program) => audit::audit(
                AuditEntry::new("PARSE", "Program", "-", "Program parsed")
                    .with_category(ActionCategory::Parse)
                    .with_duration_us(elapsed)
                    .with_meta("instructions", program.len().to_string())
                    .with_meta("labels", program.jump_targets().len().to_string()),
            ),
            Err(err) => audit::audit(
                AuditEntry::new("PARSE", "Program", "-", err.to_string())
                    .with_category(ActionCategory::Parse)
                    .with_severity(Severity::Error)
                    .with_outcome(Outcome::Failure)
                    .with_duration_us(elapsed)
                    .with_meta("code", err.code().to_string()),
            ),
        }
        result
    }

    fn scan(&mut self) -> HrmResult<()> {
        while let Some((index, raw)) = self.lines.next() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(LINE_COMMENT) {
                continue;
            }

            if let Some(label) = label_definition(line) {
                // A redefinition moves the label.
                self.program.jump_targets.insert(label, self.program.statements.len());
                continue;
            }

            let location = SourceLocation::at(line_no, self.program.statements.len());
            let instruction = self.parse_line(line).map_err(|e| e.at(location))?;
            self.program.statements.push(Statement { instruction, line: line_no });
        }
        Ok(())
    }

    /// Build one instruction, consuming continuation lines if it needs them.
    fn parse_line(&mut self, line: &str) -> HrmResult<Instruction> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let resolved = keyword_map::resolve(&tokens).map_err(|keyword| HrmError::NoSuchInstruction {
            keyword,
            location: SourceLocation::default(),
        })?;
        let kind = resolved.kind;
        let args = &tokens[resolved.keyword_tokens..];

        let instruction = match kind {
            InstructionKind::Inbox => {
                expect_args::<0>(kind, args)?;
                Instruction::Inbox
            }
            InstructionKind::Outbox => {
                expect_args::<0>(kind, args)?;
                Instruction::Outbox
            }
            InstructionKind::Jump => Instruction::Jump(label_arg(kind, args)?),
            InstructionKind::JumpZ => Instruction::JumpZ(label_arg(kind, args)?),
            InstructionKind::JumpN => Instruction::JumpN(label_arg(kind, args)?),
            InstructionKind::CopyFrom => Instruction::CopyFrom(address_arg(kind, args)?),
            InstructionKind::CopyTo => Instruction::CopyTo(address_arg(kind, args)?),
            InstructionKind::Add => Instruction::Add(address_arg(kind, args)?),
            InstructionKind::Sub => Instruction::Sub(address_arg(kind, args)?),
            InstructionKind::BumpUp => Instruction::BumpUp(address_arg(kind, args)?),
            InstructionKind::BumpDn => Instruction::BumpDn(address_arg(kind, args)?),
            InstructionKind::Comment => {
                let [id] = expect_args(kind, args)?;
                Instruction::Comment(parse_id(kind, id)?)
            }
            InstructionKind::DefineComment => {
                let [id] = expect_args(kind, args)?;
                let id = parse_id(kind, id)?;
                let text = directives::consume_block(kind, &mut self.lines)?;
                self.program.comments.insert(id, text);
                Instruction::DefineComment(id)
            }
            InstructionKind::DefineLabel => {
                let [index] = expect_args(kind, args)?;
                let index = parse_integer(kind, index)?;
                let text = directives::consume_block(kind, &mut self.lines)?;
                self.program.label_texts.insert(index, text);
                Instruction::DefineLabel(index)
            }
        };
        Ok(instruction)
    }
}

fn label_arg(kind: InstructionKind, args: &[&str]) -> HrmResult<String> {
    let [label] = expect_args(kind, args)?;
    Ok(label.to_string())
}

fn address_arg(kind: InstructionKind, args: &[&str]) -> HrmResult<crate::core::FloorAddress> {
    let [token] = expect_args(kind, args)?;
    parse_address(kind, token)
}

/// `a:` -> `Some('a')`. Only a single lowercase letter followed by a colon.
fn label_definition(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), Some(':'), None) if c.is_ascii_lowercase() => Some(c),
        _ => None,
    }
}

impl FromStr for Program {
    type Err = HrmError;

    fn from_str(source: &str) -> HrmResult<Self> {
        parse(source)
    }
}

impl Program {
    /// Parse and validate program text.
    pub fn parse(source: &str) -> HrmResult<Self> {
        parse(source)
    }
}
