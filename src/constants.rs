//! Application constants for GSSHA I/O
//!
//! This module contains the fixed literals of the GSSHA file formats,
//! default formatting widths, and file naming conventions used throughout
//! the readers and writers.

// =============================================================================
// Project File Format
// =============================================================================

/// Literal first line of every project file
pub const PROJECT_HEADER: &str = "GSSHAPROJECT";

/// Total width of the card-name field in a project option line
pub const DEFAULT_OPTION_FIELD_WIDTH: usize = 25;

// =============================================================================
// Precipitation File Format
// =============================================================================

/// Keywords that open a new chunk in a precipitation file
pub mod precip_keywords {
    /// Opens an event block
    pub const EVENT: &str = "EVENT";

    /// Number of gages declared for the event
    pub const NRGAG: &str = "NRGAG";

    /// Number of time periods declared for the event
    pub const NRPDS: &str = "NRPDS";

    /// Gage coordinate and description line
    pub const COORD: &str = "COORD";

    /// Top-level keywords recognized by the chunk parser
    pub const CHUNK_KEYWORDS: &[&str] = &[EVENT];
}

/// Decimal places used when rendering precipitation values
pub const DEFAULT_VALUE_DECIMALS: usize = 2;

/// Number of date/time fields on a value row (year, month, day, hour, minute)
pub const TIMESTAMP_FIELDS: usize = 5;

// =============================================================================
// File Naming Conventions
// =============================================================================

/// File extensions for the formats handled by this crate
pub mod extensions {
    /// Project file
    pub const PROJECT: &str = "prj";

    /// Precipitation file
    pub const PRECIPITATION: &str = "gag";

    /// Projection (WKT) file
    pub const PROJECTION: &str = "pro";

    /// Mapping table file
    pub const MAP_TABLE: &str = "cmt";
}

/// Suffix appended to the stem of projection file names
pub const PROJECTION_NAME_SUFFIX: &str = "_prj";

// =============================================================================
// Configuration
// =============================================================================

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "gssha-io";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "GSSHA_IO_LOG_LEVEL";

/// Environment variable toggling atomic writes
pub const ENV_ATOMIC_WRITES: &str = "GSSHA_IO_ATOMIC_WRITES";
