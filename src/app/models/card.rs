//! Project card vocabulary types
//!
//! A card is an immutable entry of the project file's controlled vocabulary:
//! a unique name plus the declared type of the value it takes.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Declared value type of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    String,
    Path,
    Integer,
    Float,
    Date,
    Boolean,
    Time,
}

impl ValueType {
    /// Vocabulary spelling of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "STRING",
            ValueType::Path => "PATH",
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::Date => "DATE",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Time => "TIME",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRING" => Ok(ValueType::String),
            "PATH" => Ok(ValueType::Path),
            "INTEGER" => Ok(ValueType::Integer),
            "FLOAT" => Ok(ValueType::Float),
            "DATE" => Ok(ValueType::Date),
            "BOOLEAN" => Ok(ValueType::Boolean),
            "TIME" => Ok(ValueType::Time),
            other => Err(Error::configuration(format!(
                "Unknown card value type '{}'",
                other
            ))),
        }
    }
}

/// Registered project card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub name: &'static str,
    pub value_type: ValueType,
}

impl Card {
    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Self { name, value_type }
    }

    /// Whether the card's value names another file
    pub fn is_path(&self) -> bool {
        self.value_type == ValueType::Path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_round_trips_through_text() {
        for vt in [
            ValueType::String,
            ValueType::Path,
            ValueType::Integer,
            ValueType::Float,
            ValueType::Date,
            ValueType::Boolean,
            ValueType::Time,
        ] {
            assert_eq!(vt.as_str().parse::<ValueType>().unwrap(), vt);
        }
        assert_eq!("path".parse::<ValueType>().unwrap(), ValueType::Path);
        assert!("DECIMAL".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_is_path() {
        assert!(Card::new("PRECIP_FILE", ValueType::Path).is_path());
        assert!(!Card::new("TIMESTEP", ValueType::Float).is_path());
    }
}
