//! Tests for rendering and writing projects with their sub-files

use super::super::{read_project_file, render_project, write_project};
use super::{MAP_TABLE, PRECIP, PROJECTION, project_text, write_fixture};
use crate::app::models::{Event, PrecipValue, ProjectFileId};
use crate::{Config, Database, EntityStore, Error, ReadContext, WriteContext};
use std::path::Path;
use tempfile::TempDir;

fn load(path: &Path, config: &Config) -> (Database, ProjectFileId) {
    let mut db = Database::new();
    let mut uow = db.begin();
    let id = read_project_file(&mut ReadContext::new(&mut uow, config), path).unwrap();
    uow.commit().unwrap();
    (db, id)
}

#[test]
fn test_render_without_rename_is_verbatim() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();
    let (db, id) = load(&write_fixture(dir.path()), &config);

    let text = render_project(WriteContext::new(&db, &config), id, None).unwrap();
    assert_eq!(text, project_text());
}

#[test]
fn test_write_renames_owned_sub_files_only() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config = Config::default();
    let (db, id) = load(&write_fixture(input.path()), &config);

    let written = write_project(WriteContext::new(&db, &config), id, output.path(), "copy").unwrap();

    assert_eq!(written.project, output.path().join("copy.prj"));
    assert_eq!(
        written.sub_files,
        vec![
            output.path().join("copy.gag"),
            output.path().join("copy_prj.pro"),
            output.path().join("copy.cmt"),
        ]
    );

    let prj = std::fs::read_to_string(&written.project).unwrap();
    assert!(prj.starts_with("GSSHAPROJECT\n"));
    assert!(prj.contains("PRECIP_FILE              \"copy.gag\"\n"));
    assert!(prj.contains("PROJECTION_FILE          \"copy_prj.pro\"\n"));
    assert!(prj.contains("MAPPING_TABLE            \"copy.cmt\"\n"));
    // Not read, so not renamed
    assert!(prj.contains("WATERSHED_MASK           \"parkcity.msk\"\n"));
    assert!(prj.contains("SUMMARY                  \"parkcity.sum\"\n"));

    assert_eq!(std::fs::read_to_string(output.path().join("copy.gag")).unwrap(), PRECIP);
    assert_eq!(std::fs::read_to_string(output.path().join("copy_prj.pro")).unwrap(), PROJECTION);
    assert_eq!(std::fs::read_to_string(output.path().join("copy.cmt")).unwrap(), MAP_TABLE);

    // Stored options are untouched by the rename
    let text = render_project(WriteContext::new(&db, &config), id, None).unwrap();
    assert_eq!(text, project_text());
}

#[test]
fn test_written_project_reads_back() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config = Config::default().without_atomic_writes();
    let (db, id) = load(&write_fixture(input.path()), &config);

    let written = write_project(WriteContext::new(&db, &config), id, output.path(), "again").unwrap();
    let (reread, reread_id) = load(&written.project, &config);

    assert_eq!(reread.entity_count(), db.entity_count());
    let again = write_project(WriteContext::new(&reread, &config), reread_id, output.path(), "again")
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(&again.project).unwrap(),
        std::fs::read_to_string(&written.project).unwrap()
    );
}

#[test]
fn test_pivot_failure_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let config = Config::default();
    let (mut db, id) = load(&write_fixture(input.path()), &config);

    // Drop one value so its row is incomplete
    let mut uow = db.begin();
    let event = uow.all::<Event>()[0].clone();
    let value = event.value_ids[1];
    uow.update::<Event, _>(event.id, |e| e.value_ids.retain(|v| *v != value)).unwrap();
    uow.remove::<PrecipValue>(value);
    uow.commit().unwrap();

    let err = write_project(WriteContext::new(&db, &config), id, output.path(), "broken").unwrap_err();
    assert!(matches!(err, Error::Pivot { .. }));
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}
