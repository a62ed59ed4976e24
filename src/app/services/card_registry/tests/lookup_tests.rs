//! Tests for card lookup and vocabulary integrity

use super::super::{all_cards, is_registered, lookup_card};
use crate::Error;
use crate::app::models::ValueType;
use std::collections::HashSet;

#[test]
fn test_lookup_known_cards() {
    let card = lookup_card("MANNING_N").unwrap();
    assert_eq!(card.name, "MANNING_N");
    assert_eq!(card.value_type, ValueType::Float);

    assert_eq!(
        lookup_card("PRECIP_UNIF").unwrap().value_type,
        ValueType::Boolean
    );
    assert_eq!(lookup_card("PRECIP_FILE").unwrap().value_type, ValueType::Path);
    assert_eq!(lookup_card("START_DATE").unwrap().value_type, ValueType::Date);
    assert_eq!(lookup_card("START_TIME").unwrap().value_type, ValueType::Time);
}

#[test]
fn test_lookup_unknown_card() {
    match lookup_card("NOT_A_CARD") {
        Err(Error::UnknownCard { name }) => assert_eq!(name, "NOT_A_CARD"),
        other => panic!("Expected UnknownCard, got {:?}", other),
    }
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert!(lookup_card("manning_n").is_err());
    assert!(!is_registered("manning_n"));
    assert!(is_registered("MANNING_N"));
}

#[test]
fn test_lookup_returns_shared_entry() {
    let a = lookup_card("TIMESTEP").unwrap();
    let b = lookup_card("TIMESTEP").unwrap();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn test_vocabulary_names_are_unique() {
    let mut seen = HashSet::new();
    for card in all_cards() {
        assert!(seen.insert(card.name), "duplicate card {}", card.name);
    }
}

#[test]
fn test_vocabulary_names_fit_one_token() {
    for card in all_cards() {
        assert!(!card.name.is_empty());
        assert!(
            !card.name.contains(char::is_whitespace),
            "card {} contains whitespace",
            card.name
        );
    }
}
