//! Integration tests for complete programs.
//!
//! These tests verify:
//! - Loops built from labels and JUMP
//! - Conditional jumps on zero and sign
//! - Floor used as scratch space and as constants
//! - Batch execution of one program over many inboxes

#![cfg(test)]

use crate::common::*;

use hrm_vm::*;

const OCTOPLIER: &str = "
    -- HUMAN RESOURCE MACHINE PROGRAM --
    a:
        INBOX
        COPYTO   0
        ADD      0
        COPYTO   0
        ADD      0
        COPYTO   0
        ADD      0
        OUTBOX
        JUMP     a
";

// =============================================================================
// Arithmetic Levels
// =============================================================================

mod arithmetic_levels {
    use super::*;

    #[test]
    fn octoplier_multiplies_by_eight() {
        // Arrange
        let inbox = values(&["3", "-2", "0", "125"]);

        // Act
        let result = run(OCTOPLIER, inbox, Floor::empty());

        // Assert
        assert_outbox(&result, &["24", "-16", "0", "1000"]);
        assert_eq!(result.status, RunStatus::Finished(Termination::InboxExhausted));
        assert_eq!(result.executed, 4 * 9);
    }

    #[test]
    fn multiplication_workshop() {
        // Arrange: tile 9 holds the constant zero
        let src = "
            a:
                INBOX
                COPYTO   0
                INBOX
                COPYTO   1
                COPYFROM 9
                COPYTO   2
            b:
                COPYFROM 1
                JUMPZ    c
                BUMPDN   1
                COPYFROM 2
                ADD      0
                COPYTO   2
                JUMP     b
            c:
                COPYFROM 2
                OUTBOX
                JUMP     a
        ";
        let inbox = values(&["3", "4", "7", "0", "0", "5", "9", "2"]);

        // Act
        let result = run(src, inbox, floor(&[(9, "0")]));

        // Assert
        assert_outbox(&result, &["12", "0", "0", "18"]);
        assert_tile(&result, 9, Some("0"));
    }

    #[test]
    fn caesar_shift_back_with_letter_sub() {
        // Arrange: tile 0 holds A, so X - A is the letter before X
        let src = "
            a:
                INBOX
                SUB      0
                OUTBOX
                JUMP     a
        ";

        // Act
        let result = run(src, chars("DBZ"), floor(&[(0, "A")]));

        // Assert
        assert_outbox(&result, &["C", "A", "Y"]);
    }
}

// =============================================================================
// Branching Levels
// =============================================================================

mod branching_levels {
    use super::*;

    #[test]
    fn equalization_room() {
        // Arrange
        let src = "
            a:
                INBOX
                COPYTO   0
                INBOX
                SUB      0
                JUMPZ    b
                JUMP     a
            b:
                COPYFROM 0
                OUTBOX
                JUMP     a
        ";
        let inbox = values(&["5", "5", "3", "4", "-2", "-2"]);

        // Act
        let result = run(src, inbox, Floor::empty());

        // Assert
        assert_outbox(&result, &["5", "-2"]);
    }

    #[test]
    fn exclusive_lounge() {
        // Arrange: 0 for same sign, 1 for different signs
        let src = "
            a:
                INBOX
                JUMPN    b
                INBOX
                JUMPN    d
            c:
                COPYFROM 4
                OUTBOX
                JUMP     a
            b:
                INBOX
                JUMPN    c
            d:
                COPYFROM 5
                OUTBOX
                JUMP     a
        ";
        let inbox = values(&["3", "7", "-1", "2", "4", "-6", "-2", "-8"]);

        // Act
        let result = run(src, inbox, floor(&[(4, "0"), (5, "1")]));

        // Assert
        assert_outbox(&result, &["0", "1", "1", "0"]);
    }

    #[test]
    fn jumpz_only_matches_the_zero_literal() {
        // Arrange: letters and non-zero numbers pass through
        let src = "
            a:
                INBOX
                JUMPZ    a
                OUTBOX
                JUMP     a
        ";

        // Act
        let result = run(src, values(&["0", "-1", "O", "10", "0"]), Floor::empty());

        // Assert
        assert_outbox(&result, &["-1", "O", "10"]);
    }
}

// =============================================================================
// Batch Execution
// =============================================================================

mod batch {
    use super::*;

    #[test]
    fn batch_matches_individual_runs() {
        // Arrange
        let program = parse_program(OCTOPLIER);
        let inboxes = [values(&["1", "2"]), values(&["-7"]), Vec::new(), chars("A")];
        let cases: Vec<RunCase> = inboxes
            .iter()
            .map(|inbox| RunCase::new(inbox.clone(), Floor::empty()))
            .collect();

        // Act
        let outcomes = run_batch(&program, &cases);

        // Assert
        assert_eq!(outcomes.len(), cases.len());
        for (case, outcome) in cases.iter().zip(&outcomes) {
            let mut single = program.bind(case.inbox.clone(), case.floor.clone());
            let result = single.run();
            assert_eq!(outcome.result, result);
            assert_eq!(outcome.snapshot, single.snapshot());
        }
        assert!(matches!(outcomes[3].result, Err(HrmError::MathDomainError { .. })));
    }

    #[test]
    fn batch_cases_carry_their_own_config() {
        // Arrange
        let program = parse_program("a:\nBUMPUP 0\nJUMP a");
        let cases = vec![
            RunCase::new(Vec::new(), floor(&[(0, "0")]))
                .with_config(RunConfig::default().with_max_instructions(10)),
            RunCase::new(Vec::new(), floor(&[(0, "0")]))
                .with_config(RunConfig::default().with_max_instructions(100)),
        ];

        // Act
        let outcomes = run_batch(&program, &cases);

        // Assert
        assert_eq!(outcomes[0].snapshot.floor.get(0).map(Value::as_str), Some("5"));
        assert_eq!(outcomes[1].snapshot.floor.get(0).map(Value::as_str), Some("50"));
        assert!(outcomes
            .iter()
            .all(|o| matches!(o.result, Err(HrmError::InstructionLimitExceeded { .. }))));
    }
}
