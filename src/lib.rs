//! GSSHA I/O Library
//!
//! A Rust library for reading GSSHA hydrology model files into a normalized
//! entity model and writing them back out with exact formatting fidelity.
//!
//! This library provides tools for:
//! - Splitting keyword-delimited model files into tagged chunks
//! - Building precipitation events, gages and time-series values from chunks
//! - Pivoting normalized values back into one-line-per-timestamp tables
//! - Reading and writing project files against a controlled card vocabulary
//! - Cascading reads and writes to the sub-files a project references
//! - Keeping every project load inside a single all-or-nothing unit of work

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod context;
    pub mod models;
    pub mod store;
    pub mod services {
        pub mod card_registry;
        pub mod chunk_parser;
        pub mod file_io;
        pub mod grid;
        pub mod map_table_file;
        pub mod precip_file;
        pub mod project_file;
        pub mod projection_file;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod discovery;
}

// Re-export commonly used types
pub use app::models::{Card, Event, Gage, PrecipValue, ProjectFile, ProjectOption, ValueType};
pub use app::context::{ReadContext, WriteContext};
pub use app::store::{Database, EntityStore, UnitOfWork};
pub use config::Config;

/// Result type alias for GSSHA file operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for GSSHA file reading and writing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Structural violation in parsed text
    #[error("Format error in '{file}'{}: {message}", line_suffix(.line))]
    Format {
        file: String,
        line: Option<usize>,
        message: String,
    },

    /// Card name absent from the registry
    #[error("Unknown card: {name}")]
    UnknownCard { name: String },

    /// Underlying file-system failure
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Store constraint violation or dangling entity reference
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Full-row invariant broken while pivoting values for output
    #[error("Pivot error: {message}")]
    Pivot { message: String },

    /// Operation not allowed in the assembler's current state
    #[error("Invalid state: cannot {action} while {state}")]
    InvalidState { state: String, action: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Grid provider failure
    #[error("Grid error: {message}")]
    Grid { message: String },
}

impl Error {
    /// Create a format error without a line number
    pub fn format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    /// Create a format error pointing at a 1-based line
    pub fn format_at(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    /// Create an unknown card error
    pub fn unknown_card(name: impl Into<String>) -> Self {
        Self::UnknownCard { name: name.into() }
    }

    /// Create an I/O error with the path that failed
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a pivot error
    pub fn pivot(message: impl Into<String>) -> Self {
        Self::Pivot {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(state: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
            action: action.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a grid provider error
    pub fn grid(message: impl Into<String>) -> Self {
        Self::Grid {
            message: message.into(),
        }
    }

    /// Attach a file name to a format error raised without one
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Format {
                file: current,
                line,
                message,
            } if current.is_empty() => Self::Format {
                file: file.into(),
                line,
                message,
            },
            other => other,
        }
    }

    /// Whether this error came from malformed input text
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid config file: {}", error),
        }
    }
}
