//! Tests for reading project files and cascading to sub-files

use super::super::{read_project_file, read_project_text};
use super::{MAP_TABLE, PROJECTION, project_text, write_fixture};
use crate::app::models::{MapTableFile, ProjectionFile};
use crate::{Config, Database, EntityStore, Error, ProjectFile, ReadContext};
use tempfile::TempDir;

#[test]
fn test_reads_options_in_file_order() {
    let config = Config::default();
    let mut db = Database::new();
    let mut uow = db.begin();
    let id = read_project_text(&mut ReadContext::new(&mut uow, &config), &project_text(), None, None)
        .unwrap();
    uow.commit().unwrap();

    let options = db.options_of(id).unwrap();
    let names: Vec<_> = options.iter().map(|o| o.card.name).collect();
    assert_eq!(
        names,
        [
            "WATERSHED_MASK",
            "PROJECTION_FILE",
            "MAPPING_TABLE",
            "TOT_TIME",
            "TIMESTEP",
            "SUMMARY",
            "MANNING_N",
            "PRECIP_UNIF",
            "PRECIP_FILE"
        ]
    );
    assert_eq!(options[0].value, "\"parkcity.msk\"");
    assert_eq!(options[7].value, "");

    // No directory given, so sub-files are not followed
    let project = db.require::<ProjectFile>(id).unwrap();
    assert!(project.precip_file.is_none());
}

#[test]
fn test_reads_sub_files_from_project_directory() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());

    let config = Config::default();
    let mut db = Database::new();
    let mut uow = db.begin();
    let id = read_project_file(&mut ReadContext::new(&mut uow, &config), &path).unwrap();
    uow.commit().unwrap();

    let project = db.require::<ProjectFile>(id).unwrap();
    assert_eq!(project.name.as_deref(), Some("parkcity"));
    assert_eq!(project.directory.as_deref(), Some(dir.path()));

    let precip = project.precip_file.unwrap();
    assert_eq!(db.events_of(precip).unwrap()[0].description, "Storm1");

    let projection = db
        .require::<ProjectionFile>(project.projection_file.unwrap())
        .unwrap();
    assert_eq!(projection.projection, PROJECTION);

    let map_table = db
        .require::<MapTableFile>(project.map_table_file.unwrap())
        .unwrap();
    assert_eq!(map_table.contents, MAP_TABLE);
}

#[test]
fn test_missing_header() {
    let config = Config::default();
    let mut db = Database::new();
    let mut uow = db.begin();
    let text = project_text().replace("GSSHAPROJECT\n", "");
    let err = read_project_text(&mut ReadContext::new(&mut uow, &config), &text, None, None)
        .unwrap_err();
    assert!(matches!(err, Error::Format { line: Some(1), .. }));

    let err = read_project_text(&mut ReadContext::new(&mut uow, &config), "\n\n", None, None)
        .unwrap_err();
    assert!(err.is_format());
}

#[test]
fn test_unknown_card_aborts_read() {
    let config = Config::default();
    let mut db = Database::new();
    {
        let mut uow = db.begin();
        let text = format!("{}NOT_A_CARD               1\n", project_text());
        let err = read_project_text(&mut ReadContext::new(&mut uow, &config), &text, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCard { .. }));
    }
    assert_eq!(db.entity_count(), 0);
}

#[test]
fn test_malformed_sub_file_keeps_its_own_name() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    std::fs::write(dir.path().join("parkcity.gag"), "EVENT \"x\"\nNRGAG oops\nNRPDS 0\n").unwrap();

    let config = Config::default();
    let mut db = Database::new();
    let mut uow = db.begin();
    let err = read_project_file(&mut ReadContext::new(&mut uow, &config), &path).unwrap_err();

    match err {
        Error::Format { file, line, .. } => {
            assert_eq!(file, "parkcity.gag");
            assert_eq!(line, Some(2));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_missing_sub_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    std::fs::remove_file(dir.path().join("parkcity.cmt")).unwrap();

    let config = Config::default();
    let mut db = Database::new();
    let mut uow = db.begin();
    let err = read_project_file(&mut ReadContext::new(&mut uow, &config), &path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_sub_file_cards_map_both_ways() {
    use super::super::SubFileKind;

    for kind in [
        SubFileKind::Precipitation,
        SubFileKind::Projection,
        SubFileKind::MapTable,
    ] {
        assert_eq!(SubFileKind::for_card(kind.card_name()), Some(kind));
    }
    assert_eq!(SubFileKind::for_card("SUMMARY"), None);
}
