//! Tests for the project assembler lifecycle

use super::super::{AssemblerState, ProjectAssembler, get_option};
use super::write_fixture;
use crate::{Config, EntityStore, Error};
use tempfile::TempDir;

#[test]
fn test_full_lifecycle() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let path = write_fixture(input.path());

    let mut assembler = ProjectAssembler::new(Config::default());
    assert_eq!(assembler.state(), AssemblerState::Unloaded);

    let project = assembler.load(&path).unwrap();
    assert_eq!(assembler.state(), AssemblerState::Loaded);
    assert_eq!(assembler.project().unwrap(), project);

    assembler.set_option("TOT_TIME", "360", false).unwrap();
    assert_eq!(
        get_option(assembler.database(), project, "TOT_TIME").unwrap(),
        Some("360")
    );

    let written = assembler.write(output.path(), "edited").unwrap();
    assert_eq!(assembler.state(), AssemblerState::Written);
    assert!(written.project.exists());

    // Written projects can be edited and written again
    assembler.set_option("TIMESTEP", "5", false).unwrap();
    assert_eq!(assembler.state(), AssemblerState::Loaded);
    assembler.write(output.path(), "edited").unwrap();
}

#[test]
fn test_write_before_load_is_rejected() {
    let output = TempDir::new().unwrap();
    let mut assembler = ProjectAssembler::new(Config::default());

    let err = assembler.write(output.path(), "x").unwrap_err();
    assert!(matches!(err, Error::InvalidState { .. }));
    assert!(assembler.project().is_err());
}

#[test]
fn test_second_load_is_rejected() {
    let input = TempDir::new().unwrap();
    let path = write_fixture(input.path());
    let mut assembler = ProjectAssembler::new(Config::default());
    assembler.load(&path).unwrap();

    assert!(matches!(assembler.load(&path), Err(Error::InvalidState { .. })));
}

#[test]
fn test_failed_load_commits_nothing() {
    let input = TempDir::new().unwrap();
    let path = write_fixture(input.path());
    std::fs::write(
        input.path().join("parkcity.gag"),
        "EVENT \"x\"\nNRGAG 1\nNRPDS 1\nCOORD 1.0 1.0 \"a\"\nGAGES 2017 01 01 00 00 1.0 2.0\n",
    )
    .unwrap();

    let mut assembler = ProjectAssembler::new(Config::default());
    let err = assembler.load(&path).unwrap_err();

    assert!(err.is_format());
    assert_eq!(assembler.state(), AssemblerState::Unloaded);
    assert_eq!(assembler.database().entity_count(), 0);
}

#[test]
fn test_unknown_card_edit_keeps_state() {
    let input = TempDir::new().unwrap();
    let path = write_fixture(input.path());
    let mut assembler = ProjectAssembler::new(Config::default());
    let project = assembler.load(&path).unwrap();
    let before = assembler.database().options_of(project).unwrap().len();

    assert!(assembler.set_option("NOT_A_CARD", "1", false).is_err());
    assert_eq!(assembler.state(), AssemblerState::Loaded);
    assert_eq!(assembler.database().options_of(project).unwrap().len(), before);
}
