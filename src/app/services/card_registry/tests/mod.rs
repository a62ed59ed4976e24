//! Tests for the card registry

mod lookup_tests;
