//! Tests for project reading, option editing, writing and assembly

mod assembler_tests;
mod reader_tests;
mod writer_tests;

use crate::app::models::{ProjectFile, ProjectFileId};
use crate::app::store::Database;
use std::path::Path;

pub const PRECIP: &str = "EVENT \"Storm1\"
NRGAG 2
NRPDS 1
COORD 100.0 200.0 \"GageA\"
COORD 150.0 250.0 \"GageB\"
RAD 2017 02 28 14 33 1.20 2.40
";

pub const PROJECTION: &str = "PROJCS[\"WGS_1984_UTM_Zone_12N\",GEOGCS[\"GCS_WGS_1984\"]]";

pub const MAP_TABLE: &str = "GSSHA_INDEX_MAP_TABLES\nINDEX_MAP \"soil.idx\" \"SOIL\"\n";

/// Project text referencing all three readable sub-files
pub fn project_text() -> String {
    [
        "GSSHAPROJECT",
        "WATERSHED_MASK           \"parkcity.msk\"",
        "PROJECTION_FILE          \"parkcity_prj.pro\"",
        "MAPPING_TABLE            \"parkcity.cmt\"",
        "TOT_TIME                 180",
        "TIMESTEP                 10",
        "SUMMARY                  \"parkcity.sum\"",
        "MANNING_N                0.013",
        "PRECIP_UNIF",
        "PRECIP_FILE              \"parkcity.gag\"",
        "",
    ]
    .join("\n")
}

/// Write a complete project into `dir` and return the `.prj` path
pub fn write_fixture(dir: &Path) -> std::path::PathBuf {
    std::fs::write(dir.join("parkcity.gag"), PRECIP).unwrap();
    std::fs::write(dir.join("parkcity_prj.pro"), PROJECTION).unwrap();
    std::fs::write(dir.join("parkcity.cmt"), MAP_TABLE).unwrap();
    let path = dir.join("parkcity.prj");
    std::fs::write(&path, project_text()).unwrap();
    path
}

/// Committed empty project
pub fn empty_project(db: &mut Database) -> ProjectFileId {
    let mut uow = db.begin();
    let id = uow.allocate();
    uow.add(ProjectFile::new(id, Some("demo".to_string())));
    uow.commit().unwrap();
    id
}
