//! Project (`.prj`) file assembler
//!
//! A project file is the literal `GSSHAPROJECT` header followed by one
//! card/value line per option. Reading looks every card up in the registry
//! and follows the PATH cards that name sub-files this crate understands.
//! Writing renders the project and then cascades to the owned sub-files.
//!
//! ## Usage
//!
//! ```rust
//! use gssha_io::app::services::project_file::{render_project, set_option};
//! use gssha_io::{Config, Database, ProjectFile, WriteContext};
//!
//! let mut db = Database::new();
//! let mut uow = db.begin();
//! let project = uow.allocate();
//! uow.add(ProjectFile::new(project, Some("demo".to_string())));
//! set_option(&mut uow, project, "MANNING_N", "0.0013", false).unwrap();
//! set_option(&mut uow, project, "PRECIP_UNIF", "", false).unwrap();
//! uow.commit().unwrap();
//!
//! let config = Config::default();
//! let text = render_project(WriteContext::new(&db, &config), project, None).unwrap();
//! assert_eq!(text, "GSSHAPROJECT\nMANNING_N                0.0013\nPRECIP_UNIF\n");
//! ```

pub mod assembler;
pub mod options;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use crate::app::models::ProjectFile;
use crate::app::services::file_io::strip_quotes;
use crate::app::services::projection_file::projection_stem;
use crate::constants::extensions;
use std::path::PathBuf;

pub use assembler::{AssemblerState, ProjectAssembler};
pub use options::{get_option, project_grid, remove_option, set_option, set_outlet};
pub use reader::{read_project_file, read_project_text};
pub use writer::{WrittenFiles, render_project, write_project};

/// Sub-files a project can own, keyed by the PATH card that names them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubFileKind {
    Precipitation,
    Projection,
    MapTable,
}

const SUB_FILE_CARDS: &[(&str, SubFileKind)] = &[
    ("PRECIP_FILE", SubFileKind::Precipitation),
    ("PROJECTION_FILE", SubFileKind::Projection),
    ("MAPPING_TABLE", SubFileKind::MapTable),
];

impl SubFileKind {
    /// Sub-file kind read for a PATH card, if any
    pub fn for_card(card_name: &str) -> Option<Self> {
        SUB_FILE_CARDS
            .iter()
            .find(|(name, _)| *name == card_name)
            .map(|(_, kind)| *kind)
    }

    /// Card that names this sub-file
    pub fn card_name(self) -> &'static str {
        match self {
            SubFileKind::Precipitation => "PRECIP_FILE",
            SubFileKind::Projection => "PROJECTION_FILE",
            SubFileKind::MapTable => "MAPPING_TABLE",
        }
    }

    /// File name of this sub-file when written under project `name`
    pub fn file_name(self, name: &str) -> String {
        match self {
            SubFileKind::Precipitation => format!("{}.{}", name, extensions::PRECIPITATION),
            SubFileKind::Projection => format!("{}.{}", projection_stem(name), extensions::PROJECTION),
            SubFileKind::MapTable => format!("{}.{}", name, extensions::MAP_TABLE),
        }
    }

    /// Whether the project currently owns a sub-file of this kind
    pub fn is_owned_by(self, project: &ProjectFile) -> bool {
        match self {
            SubFileKind::Precipitation => project.precip_file.is_some(),
            SubFileKind::Projection => project.projection_file.is_some(),
            SubFileKind::MapTable => project.map_table_file.is_some(),
        }
    }
}

/// Resolve a PATH option value against the project's directory
pub fn resolve_path(project: &ProjectFile, value: &str) -> PathBuf {
    let relative = strip_quotes(value);
    match &project.directory {
        Some(dir) => dir.join(relative),
        None => PathBuf::from(relative),
    }
}
