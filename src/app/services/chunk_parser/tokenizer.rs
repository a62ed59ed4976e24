//! Whitespace tokenizer with quoted-argument support
//!
//! Splits a line on runs of whitespace. A double-quoted argument is one
//! token with its quotes removed, so `COORD 1 2 "Gage A"` yields four tokens.

use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""([^"]*)"|(\S+)"#).unwrap_or_else(|e| panic!("token pattern: {}", e))
    })
}

/// Split a line into tokens, stripping quotes from quoted arguments
pub fn tokenize(line: &str) -> Vec<String> {
    token_pattern()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First whitespace-delimited word of a line, if any
pub fn first_word(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}
