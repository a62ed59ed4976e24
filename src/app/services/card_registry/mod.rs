//! Card registry providing O(1) lookups into the project card vocabulary
//!
//! The vocabulary is static and immutable. Cards are shared by reference:
//! options point at the registered `&'static Card` and never own one.

use crate::app::models::Card;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

pub mod vocabulary;

#[cfg(test)]
pub mod tests;

pub use vocabulary::CARDS;

/// Name index over the static vocabulary, built on first use
fn index() -> &'static HashMap<&'static str, &'static Card> {
    static INDEX: OnceLock<HashMap<&'static str, &'static Card>> = OnceLock::new();
    INDEX.get_or_init(|| CARDS.iter().map(|card| (card.name, card)).collect())
}

/// Look up a registered card by exact name
pub fn lookup_card(name: &str) -> Result<&'static Card> {
    index()
        .get(name)
        .copied()
        .ok_or_else(|| Error::unknown_card(name))
}

/// Check whether a card name is registered
pub fn is_registered(name: &str) -> bool {
    index().contains_key(name)
}

/// All registered cards in vocabulary order
pub fn all_cards() -> &'static [Card] {
    CARDS
}
