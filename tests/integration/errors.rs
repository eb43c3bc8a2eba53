//! Integration tests for error reporting.
//!
//! These tests verify:
//! - Parse errors are raised before any run exists
//! - Run errors carry the failing instruction's location
//! - A failed run keeps the state it reached
//! - Error categories and codes

#![cfg(test)]

use crate::common::*;

use hrm_vm::*;

// =============================================================================
// Parse-time Errors
// =============================================================================

mod parse_errors {
    use super::*;

    #[test]
    fn unknown_keyword_is_reported_uppercased() {
        // Act
        let err = try_parse("INBOX\n  frogs 3").unwrap_err();

        // Assert
        assert!(matches!(err, HrmError::NoSuchInstruction { ref keyword, .. } if keyword == "FROGS"));
        assert_eq!(err.location().map(|l| l.line), Some(2));
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.code(), 1001);
    }

    #[test]
    fn every_jump_kind_checks_its_label() {
        for keyword in ["JUMP", "JUMPZ", "JUMPN"] {
            // Arrange
            let src = format!("a:\nINBOX\n{} z", keyword);

            // Act
            let result = try_parse(&src);

            // Assert
            assert!(
                matches!(result, Err(HrmError::InvalidJumpTarget { ref label, .. }) if label == "z"),
                "{} should reject an undefined label",
                keyword
            );
        }
    }

    #[test]
    fn label_names_are_single_lowercase_letters() {
        // Uppercase and multi-letter lines are not labels, so they fail as keywords.
        assert!(matches!(try_parse("A:"), Err(HrmError::NoSuchInstruction { .. })));
        assert!(matches!(try_parse("ab:"), Err(HrmError::NoSuchInstruction { .. })));
        // And a jump can never name them.
        assert!(matches!(try_parse("a:\nJUMP A"), Err(HrmError::InvalidJumpTarget { .. })));
    }

    #[test]
    fn malformed_arguments() {
        for src in ["COPYFROM", "COPYFROM x", "COPYTO [3", "ADD 1 2", "OUTBOX 1", "COMMENT -1", "JUMP"] {
            let err = try_parse(src).unwrap_err();
            assert!(
                matches!(err, HrmError::InvalidArgument { .. }),
                "{:?} gave {:?}",
                src,
                err
            );
            assert!(err.is_parse_error());
        }
    }

    #[test]
    fn floor_literals_are_range_checked() {
        assert!(matches!(try_parse("COPYTO 20"), Err(HrmError::InvalidFloorIndex { index: 20, .. })));
        assert!(matches!(try_parse("BUMPUP [-1]"), Err(HrmError::InvalidFloorIndex { index: -1, .. })));
        assert!(matches!(
            try_parse("DEFINE LABEL 25\nabc;"),
            Err(HrmError::InvalidFloorIndex { index: 25, .. })
        ));
        assert!(try_parse("COPYTO 19\nCOPYFROM [0]").is_ok());
    }

    #[test]
    fn comment_must_be_defined() {
        // Arrange: the definition may come after the reference
        let later = "COMMENT 7\nDEFINE COMMENT 7\nnote;";

        // Act & Assert
        assert!(try_parse(later).is_ok());
        assert!(matches!(try_parse("COMMENT 7"), Err(HrmError::InvalidArgument { .. })));
    }

    #[test]
    fn unterminated_define_block() {
        let err = try_parse("DEFINE COMMENT 0\nabc\nINBOX").unwrap_err();
        assert!(matches!(err, HrmError::InvalidArgument { ref instruction, .. } if instruction == "DEFINE COMMENT"));
    }
}

// =============================================================================
// Run-time Errors
// =============================================================================

mod run_errors {
    use super::*;

    #[test]
    fn failure_keeps_state_so_far() {
        // Arrange
        let src = "
            INBOX
            COPYTO   0
            OUTBOX
            INBOX
            ADD      0
            OUTBOX
        ";

        // Act: the letter in tile 0 makes the ADD fail
        let (err, state) = run_err(src, chars("A5"), Floor::empty());

        // Assert
        assert!(matches!(err, HrmError::MathDomainError { .. }));
        assert_eq!(err.location().and_then(|l| l.instruction), Some(4));
        assert_eq!(state.program_counter, 4);
        assert_eq!(state.executed, 4);
        assert_outbox(&state, &["A"]);
        assert_hands(&state, Some("5"));
        assert_tile(&state, 0, Some("A"));
        assert_eq!(state.status, RunStatus::Failed);
    }

    #[test]
    fn failed_bump_leaves_tile_alone() {
        // Act
        let (err, state) = run_err("BUMPUP 2", Vec::new(), floor(&[(2, "Q")]));

        // Assert
        assert!(matches!(err, HrmError::MathDomainError { .. }));
        assert_tile(&state, 2, Some("Q"));
        assert_hands(&state, None);
    }

    #[test]
    fn bump_on_empty_tile() {
        let (err, _) = run_err("BUMPDN 7", Vec::new(), Floor::empty());
        assert!(matches!(err, HrmError::EmptyFloorTile { index: 7, .. }));
    }

    #[test]
    fn instruction_cap_stops_infinite_loops() {
        // Arrange
        let program = parse_program("a:\nJUMP a");
        let config = RunConfig::default().with_max_instructions(1000);

        // Act
        let mut run = program.bind_with_config(Vec::new(), Floor::empty(), config);
        let err = run.run().unwrap_err();

        // Assert
        assert!(matches!(err, HrmError::InstructionLimitExceeded { limit: 1000, .. }));
        assert_eq!(run.executed(), 1000);
        assert!(err.is_run_error());
    }

    #[test]
    fn stepping_a_failed_run_repeats_the_error() {
        // Arrange
        let program = parse_program("OUTBOX\nINBOX");
        let mut run = program.bind(chars("A"), Floor::empty());

        // Act
        let first = run.step().unwrap_err();
        let again = run.step().unwrap_err();

        // Assert
        assert_eq!(first, again);
        assert_eq!(run.status(), RunStatus::Failed);
        assert_eq!(run.error(), Some(&first));
        assert_eq!(run.inbox().len(), 1);
        assert_eq!(run.executed(), 0);
    }

    #[test]
    fn errors_render_with_location() {
        let (err, _) = run_err("INBOX\nOUTBOX\nOUTBOX", chars("A"), Floor::empty());
        let message = err.to_string();
        assert!(message.contains("line 3"), "{}", message);
        assert!(message.contains("OUTBOX"), "{}", message);
    }

    #[test]
    fn bad_inputs_are_binding_errors() {
        let err = inbox_from_tokens(["12", "AB"]).unwrap_err();
        assert!(matches!(err, HrmError::InvalidValue { ref text } if text == "AB"));
        assert_eq!(err.category(), ErrorCategory::Binding);

        let err = Floor::from_sparse([(20, Value::number(1))]).unwrap_err();
        assert!(matches!(err, HrmError::InvalidFloorSeed { .. }));
        assert!(Floor::from_dense(vec![None; 21]).is_err());
    }
}
