//! Data models for GSSHA model files
//!
//! This module contains the normalized entities that model files are read into:
//! project files with their card options, precipitation files with events,
//! gages and time-series values, and the verbatim sub-files a project owns.
//!
//! Entities refer to each other through typed integer ids. Parents list the
//! ids of the children they own; children carry the id of their parent so
//! back-references are plain lookups through the store.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

pub mod card;

pub use card::{Card, ValueType};

// =============================================================================
// Entity Ids
// =============================================================================

/// Integer identity shared by every entity id type
///
/// Ids are allocated from a single counter per store, so a raw id is unique
/// across all entity kinds and ascending raw ids follow creation order.
pub trait EntityId: Copy + Ord + std::fmt::Debug {
    fn from_raw(raw: u64) -> Self;
    fn raw(self) -> u64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(pub u64);

        impl EntityId for $name {
            fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            fn raw(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

entity_id!(
    /// Id of a [`ProjectFile`]
    ProjectFileId
);
entity_id!(
    /// Id of a [`ProjectOption`]
    OptionId
);
entity_id!(
    /// Id of a [`PrecipFile`]
    PrecipFileId
);
entity_id!(
    /// Id of an [`Event`]
    EventId
);
entity_id!(
    /// Id of a [`Gage`]
    GageId
);
entity_id!(
    /// Id of a [`PrecipValue`]
    ValueId
);
entity_id!(
    /// Id of a [`ProjectionFile`]
    ProjectionFileId
);
entity_id!(
    /// Id of a [`MapTableFile`]
    MapTableFileId
);

// =============================================================================
// Project File
// =============================================================================

/// Top-level project file owning its options and sub-files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectFile {
    pub id: ProjectFileId,

    /// Project name (file stem of the `.prj` file)
    pub name: Option<String>,

    /// Directory the project was read from
    pub directory: Option<PathBuf>,

    /// Options in file order, at most one per card
    pub option_ids: Vec<OptionId>,

    pub precip_file: Option<PrecipFileId>,
    pub projection_file: Option<ProjectionFileId>,
    pub map_table_file: Option<MapTableFileId>,
}

impl ProjectFile {
    /// Create an empty project with no options or sub-files
    pub fn new(id: ProjectFileId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            directory: None,
            option_ids: Vec::new(),
            precip_file: None,
            projection_file: None,
            map_table_file: None,
        }
    }
}

/// A card/value pair attached to a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectOption {
    pub id: OptionId,
    pub project: ProjectFileId,

    /// Shared vocabulary entry, never owned by the option
    pub card: &'static Card,

    /// Raw value text, including any surrounding quotes
    pub value: String,
}

impl ProjectOption {
    /// Render the option as one project file line
    ///
    /// Boolean cards emit the card name alone. Other cards pad the name to
    /// `field_width` characters; longer names are not truncated.
    pub fn render(&self, field_width: usize) -> String {
        render_option_line(self.card, &self.value, field_width)
    }
}

/// Render a card/value pair as a project file line
pub fn render_option_line(card: &Card, value: &str, field_width: usize) -> String {
    if card.value_type == ValueType::Boolean {
        format!("{}\n", card.name)
    } else {
        format!("{:<width$}{}\n", card.name, value, width = field_width)
    }
}

// =============================================================================
// Precipitation File
// =============================================================================

/// Precipitation (`.gag`) file owning an ordered list of events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipFile {
    pub id: PrecipFileId,

    /// Name of the file this was read from
    pub file_name: Option<String>,

    pub event_ids: Vec<EventId>,
}

/// One precipitation episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub precip_file: PrecipFileId,
    pub description: String,

    /// Declared gage count (NRGAG)
    pub nr_gag: usize,

    /// Declared period count (NRPDS)
    pub nr_pds: usize,

    /// Gages in declaration order
    pub gage_ids: Vec<GageId>,

    /// Values in read order
    pub value_ids: Vec<ValueId>,
}

/// A point location contributing one value column to its event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gage {
    pub id: GageId,
    pub event: EventId,

    /// Zero-based column position within the event
    pub position: usize,

    pub description: String,
    pub x: f64,
    pub y: f64,
}

/// A single time-stamped measurement for one gage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipValue {
    pub id: ValueId,
    pub event: EventId,
    pub gage: GageId,

    /// Row type tag (GAGES, RADAR, RATES, ...)
    pub value_type: String,

    /// Minute-precision timestamp
    pub date_time: NaiveDateTime,

    pub value: f64,
}

// =============================================================================
// Verbatim Sub-files
// =============================================================================

/// Projection (`.pro`) file holding opaque WKT text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionFile {
    pub id: ProjectionFileId,
    pub projection: String,
}

/// Mapping table (`.cmt`) file carried through as raw text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTableFile {
    pub id: MapTableFileId,
    pub contents: String,
}
