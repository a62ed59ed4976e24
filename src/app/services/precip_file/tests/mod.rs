//! Tests for precipitation file reading, pivoting and rendering


use crate::app::models::PrecipFileId;
use crate::app::services::chunk_parser::{Chunk, chunk};
use crate::config::Config;
use crate::constants::precip_keywords::CHUNK_KEYWORDS;
use crate::{Database, ReadContext};

/// Two-gage single-period event
pub const STORM1: &str = "EVENT \"Storm1\"
NRGAG 2
NRPDS 1
COORD 100.0 200.0 \"GageA\"
COORD 150.0 250.0 \"GageB\"
RAD 2017 02 28 14 33 1.20 2.40
";

/// Two events, the second spanning three periods with two row types
pub const MULTI_EVENT: &str = "EVENT \"Storm1\"
NRGAG 2
NRPDS 1
COORD 100.0 200.0 \"GageA\"
COORD 150.0 250.0 \"GageB\"
RAD 2017 02 28 14 33 1.20 2.40
EVENT \"Long Storm\"
NRGAG 3
NRPDS 3
COORD 10.5 20.25 \"North Ridge\"
COORD 11.0 21.0 \"Valley\"
COORD 12.0 22.0 \"Outlet\"
GAGES 2017 03 01 00 00 0.00 0.10 0.20
RATES 2017 03 01 00 00 1.00 1.10 1.20
GAGES 2017 03 01 01 00 0.30 0.40 0.50
GAGES 2017 03 01 02 00 0.60 0.70 0.80
";

/// First chunk of `text`
pub fn first_chunk(text: &str) -> Chunk {
    chunk(text, CHUNK_KEYWORDS)
        .unwrap()
        .into_iter()
        .next()
        .unwrap()
}

/// Read `text` into a fresh database and commit
pub fn load(text: &str) -> (Database, PrecipFileId) {
    load_with(text, &Config::default())
}

pub fn load_with(text: &str, config: &Config) -> (Database, PrecipFileId) {
    let mut db = Database::new();
    let mut uow = db.begin();
    let id = super::read_precip_text(&mut ReadContext::new(&mut uow, config), text, Some("test.gag"))
        .unwrap();
    uow.commit().unwrap();
    (db, id)
}
