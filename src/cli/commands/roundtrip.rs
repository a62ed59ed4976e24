//! Roundtrip command: read a project with its sub-files and write it back out

use super::shared::{CommandStats, create_spinner};
use crate::app::models::Event;
use crate::app::services::project_file::{ProjectAssembler, WrittenFiles};
use crate::app::store::EntityStore;
use crate::cli::args::RoundtripArgs;
use crate::cli::discovery::{find_project_file, output_name};
use crate::config::Config;
use anyhow::Context;
use colored::*;
use std::time::Instant;
use tracing::info;

/// Read `args.project` and write it into `args.output_dir` under a new name
pub async fn run_roundtrip(
    args: RoundtripArgs,
    config: Config,
    show_progress: bool,
) -> anyhow::Result<CommandStats> {
    let start_time = Instant::now();
    args.validate()?;

    let project_file = find_project_file(&args.project)?;
    let name = output_name(&project_file, args.name.as_deref())?;
    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;

    info!(
        "Round-tripping {} into {} as '{}'",
        project_file.display(),
        args.output_dir.display(),
        name
    );

    let spinner = create_spinner(&format!("Reading {}", project_file.display()), show_progress);
    let source = project_file.clone();
    let output_dir = args.output_dir.clone();

    let outcome = tokio::task::spawn_blocking(move || -> crate::Result<_> {
        let mut assembler = ProjectAssembler::new(config);
        assembler.load(&source)?;
        let written = assembler.write(&output_dir, &name)?;
        let db = assembler.database();
        Ok((written, db.all::<Event>().len(), db.entity_count()))
    })
    .await
    .context("Roundtrip task panicked")?;
    spinner.finish_and_clear();

    let (written, events, entities) =
        outcome.with_context(|| format!("Failed to round-trip {}", project_file.display()))?;

    let stats = CommandStats {
        files_read: written.sub_files.len() + 1,
        files_written: written.sub_files.len() + 1,
        events,
        entities,
        processing_time: start_time.elapsed(),
    };

    if show_progress {
        print_written(&written, &stats);
    }
    Ok(stats)
}

fn print_written(written: &WrittenFiles, stats: &CommandStats) {
    println!("{} {}", "Wrote".green().bold(), written.project.display());
    for path in &written.sub_files {
        println!("      {}", path.display());
    }
    println!("{}", stats.summary().dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::project_file::tests::write_fixture;
    use tempfile::TempDir;

    fn args(project: std::path::PathBuf, output_dir: std::path::PathBuf) -> RoundtripArgs {
        RoundtripArgs {
            project,
            output_dir,
            name: Some("copy".to_string()),
            lenient_periods: false,
        }
    }

    #[tokio::test]
    async fn test_roundtrip_writes_renamed_project() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_fixture(input.path());

        let out_dir = output.path().join("nested");
        let stats = run_roundtrip(args(input.path().to_path_buf(), out_dir.clone()), Config::default(), false)
            .await
            .unwrap();

        assert_eq!(stats.files_written, 4);
        assert_eq!(stats.events, 1);
        for file in ["copy.prj", "copy.gag", "copy_prj.pro", "copy.cmt"] {
            assert!(out_dir.join(file).is_file(), "missing {}", file);
        }
        let project = std::fs::read_to_string(out_dir.join("copy.prj")).unwrap();
        assert!(project.contains("PRECIP_FILE              \"copy.gag\""));
    }

    #[tokio::test]
    async fn test_roundtrip_reports_malformed_subfile() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_fixture(input.path());
        std::fs::write(input.path().join("parkcity.gag"), "EVENT \"x\"\nNRGAG 1\nNRGAG 1\n").unwrap();

        let error = run_roundtrip(
            args(input.path().join("parkcity.prj"), output.path().to_path_buf()),
            Config::default(),
            false,
        )
        .await
        .unwrap_err();

        assert!(format!("{:#}", error).contains("parkcity.gag"));
        assert!(!output.path().join("copy.prj").exists());
    }
}
