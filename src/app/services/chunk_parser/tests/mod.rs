//! Tests for the chunk parser

mod chunk_tests;

/// Two-event precipitation text used across chunk tests
pub fn two_event_text() -> String {
    r#"EVENT "Storm 1"
NRGAG 1
NRPDS 1
COORD 1.0 2.0 "Only Gage"
GAGES 2017 02 28 14 33 0.50

EVENT "Storm 2"
NRGAG 0
NRPDS 0"#
        .to_string()
}
