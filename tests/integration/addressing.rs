//! Integration tests for floor addressing.
//!
//! These tests verify:
//! - Direct addresses reach every tile
//! - Pointer addresses are resolved through the tile's contents
//! - Pointer contents are read again on every use
//! - Bad pointers fail at run time, bad literals at parse time

#![cfg(test)]

use crate::common::*;

use hrm_vm::*;

// =============================================================================
// Direct Addressing
// =============================================================================

mod direct {
    use super::*;

    #[test]
    fn every_tile_round_trips() {
        for index in 0..FLOOR_SIZE {
            // Arrange
            let src = format!("INBOX\nCOPYTO {0}\nCOPYFROM {0}\nOUTBOX", index);

            // Act
            let result = run(&src, values(&["42"]), Floor::empty());

            // Assert
            assert_outbox(&result, &["42"]);
            assert_tile(&result, index, Some("42"));
            assert_eq!(result.floor.occupied().count(), 1);
        }
    }

    #[test]
    fn copyto_overwrites() {
        let result = run("INBOX\nCOPYTO 5\nINBOX\nCOPYTO 5", chars("XY"), floor(&[(5, "Q")]));
        assert_tile(&result, 5, Some("Y"));
    }
}

// =============================================================================
// Pointer Addressing
// =============================================================================

mod pointer {
    use super::*;

    #[test]
    fn copyto_writes_through_pointer() {
        // Arrange: tile 0 points at tile 12
        let start = floor(&[(0, "12")]);

        // Act
        let result = run("INBOX\nCOPYTO [0]", chars("K"), start);

        // Assert
        assert_tile(&result, 12, Some("K"));
        assert_tile(&result, 0, Some("12"));
    }

    #[test]
    fn bump_changes_target_not_pointer() {
        // Arrange
        let start = floor(&[(1, "7"), (7, "-1")]);

        // Act
        let result = run("BUMPUP [1]\nBUMPUP [1]", Vec::new(), start);

        // Assert
        assert_tile(&result, 1, Some("7"));
        assert_tile(&result, 7, Some("1"));
        assert_hands(&result, Some("1"));
    }

    #[test]
    fn pointer_to_itself() {
        // Tile 3 holds 3, so [3] is tile 3.
        let result = run("BUMPDN [3]\nCOPYFROM 3\nOUTBOX", Vec::new(), floor(&[(3, "3")]));
        assert_outbox(&result, &["2"]);
    }

    #[test]
    fn pointer_is_reread_after_change() {
        // Arrange: walk a pointer in tile 0 across tiles 10..13 and read each
        let src = "
            a:
                COPYFROM [0]
                OUTBOX
                BUMPUP   0
                SUB      1
                JUMPZ    b
                JUMP     a
            b:
        ";
        let start = floor(&[(0, "10"), (1, "13"), (10, "A"), (11, "B"), (12, "C")]);

        // Act
        let result = run(src, Vec::new(), start);

        // Assert
        assert_outbox(&result, &["A", "B", "C"]);
        assert_tile(&result, 0, Some("13"));
        assert_eq!(result.status, RunStatus::Finished(Termination::EndOfProgram));
    }

    #[test]
    fn add_and_sub_through_pointer() {
        // Arrange
        let start = floor(&[(2, "9"), (9, "4")]);

        // Act
        let result = run("INBOX\nADD [2]\nOUTBOX\nINBOX\nSUB [2]\nOUTBOX", values(&["10", "1"]), start);

        // Assert
        assert_outbox(&result, &["14", "-3"]);
    }
}

// =============================================================================
// Bad Pointers
// =============================================================================

mod bad_pointers {
    use super::*;

    #[test]
    fn negative_pointer_is_out_of_range() {
        let (err, state) = run_err("COPYFROM [4]", Vec::new(), floor(&[(4, "-1")]));
        assert!(matches!(err, HrmError::PointerOutOfRange { pointer: 4, target: -1, .. }));
        assert_hands(&state, None);
    }

    #[test]
    fn large_pointer_is_out_of_range() {
        let (err, _) = run_err("INBOX\nCOPYTO [4]", chars("A"), floor(&[(4, "20")]));
        assert!(matches!(err, HrmError::PointerOutOfRange { target: 20, .. }));
        assert_eq!(err.location().map(|l| l.line), Some(2));
    }

    #[test]
    fn letter_pointer_is_a_domain_error() {
        let (err, _) = run_err("BUMPUP [0]", Vec::new(), floor(&[(0, "C")]));
        assert!(matches!(err, HrmError::MathDomainError { .. }));
    }

    #[test]
    fn empty_pointer_tile() {
        let (err, _) = run_err("COPYFROM [6]", Vec::new(), Floor::empty());
        assert!(matches!(err, HrmError::EmptyFloorTile { index: 6, .. }));
    }

    #[test]
    fn pointer_literals_are_checked_at_parse_time() {
        assert!(matches!(try_parse("COPYFROM [20]"), Err(HrmError::InvalidFloorIndex { index: 20, .. })));
        assert!(matches!(try_parse("COPYTO [-1]"), Err(HrmError::InvalidFloorIndex { index: -1, .. })));
    }
}
