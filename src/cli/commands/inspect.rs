//! Inspect command: load a project and report what it contains

use super::shared::CommandStats;
use crate::app::models::{Event, ProjectFile, ProjectFileId, ValueType};
use crate::app::services::project_file::{ProjectAssembler, SubFileKind};
use crate::app::store::EntityStore;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::cli::discovery::find_project_file;
use crate::config::Config;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDateTime;
use colored::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

/// Everything `inspect` reports about one project
#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub name: Option<String>,
    pub path: PathBuf,
    pub options: Vec<OptionReport>,
    pub sub_files: Vec<&'static str>,
    pub events: Vec<EventReport>,
}

#[derive(Debug, Serialize)]
pub struct OptionReport {
    pub card: &'static str,
    pub value_type: ValueType,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct EventReport {
    pub description: String,
    pub gages: Vec<String>,
    pub periods: usize,
    pub value_types: Vec<String>,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

/// Load `args.project` and print a report in the requested format
pub async fn run_inspect(args: InspectArgs, config: Config) -> anyhow::Result<CommandStats> {
    let start_time = Instant::now();
    let project_file = find_project_file(&args.project)?;

    let source = project_file.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut assembler = ProjectAssembler::new(config);
        let project = assembler.load(&source)?;
        let db = assembler.database();
        let report = build_report(db, project, source)?;
        Ok((report, db.entity_count()))
    })
    .await
    .context("Inspect task panicked")?;

    let (report, entities) =
        outcome.with_context(|| format!("Failed to load {}", project_file.display()))?;

    match args.output_format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }

    Ok(CommandStats {
        files_read: report.sub_files.len() + 1,
        files_written: 0,
        events: report.events.len(),
        entities,
        processing_time: start_time.elapsed(),
    })
}

/// Collect the report for a stored project
pub fn build_report<S: EntityStore>(
    store: &S,
    project: ProjectFileId,
    path: PathBuf,
) -> Result<ProjectReport> {
    let file = store.require::<ProjectFile>(project)?;

    let options = store
        .options_of(project)?
        .into_iter()
        .map(|o| OptionReport {
            card: o.card.name,
            value_type: o.card.value_type,
            value: o.value.clone(),
        })
        .collect();

    let sub_files = [
        SubFileKind::Precipitation,
        SubFileKind::Projection,
        SubFileKind::MapTable,
    ]
    .into_iter()
    .filter(|kind| kind.is_owned_by(file))
    .map(SubFileKind::card_name)
    .collect();

    let events = match file.precip_file {
        Some(precip) => store
            .events_of(precip)?
            .into_iter()
            .map(|event| event_report(store, event))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(ProjectReport {
        name: file.name.clone(),
        path,
        options,
        sub_files,
        events,
    })
}

fn event_report<S: EntityStore>(store: &S, event: &Event) -> Result<EventReport> {
    let gages = store
        .gages_of(event.id)?
        .into_iter()
        .map(|g| g.description.clone())
        .collect();

    let values = store.values_of(event.id)?;
    let timestamps: BTreeSet<NaiveDateTime> = values.iter().map(|v| v.date_time).collect();
    let value_types: BTreeSet<&str> = values.iter().map(|v| v.value_type.as_str()).collect();

    Ok(EventReport {
        description: event.description.clone(),
        gages,
        periods: timestamps.len(),
        value_types: value_types.into_iter().map(str::to_string).collect(),
        first: timestamps.first().copied(),
        last: timestamps.last().copied(),
    })
}

fn print_human(report: &ProjectReport) {
    println!(
        "{} {}",
        "Project".bold(),
        report.name.as_deref().unwrap_or("<unnamed>").bright_cyan()
    );
    println!("  {}", report.path.display().to_string().dimmed());

    println!("\n{} ({})", "Options".bold(), report.options.len());
    for option in &report.options {
        println!(
            "  {:<25}{:<10}{}",
            option.card,
            option.value_type.to_string().dimmed(),
            option.value
        );
    }

    if !report.sub_files.is_empty() {
        println!("\n{} {}", "Sub-files:".bold(), report.sub_files.join(", "));
    }

    if !report.events.is_empty() {
        println!("\n{} ({})", "Precipitation events".bold(), report.events.len());
    }
    for event in &report.events {
        let span = match (event.first, event.last) {
            (Some(first), Some(last)) => format!("{} .. {}", first, last),
            _ => "no values".to_string(),
        };
        println!(
            "  {} {} gages, {} periods [{}] {}",
            event.description.green(),
            event.gages.len(),
            event.periods,
            event.value_types.join(","),
            span.dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::project_file::tests::write_fixture;
    use tempfile::TempDir;

    #[test]
    fn test_report_covers_options_and_events() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(dir.path());

        let mut assembler = ProjectAssembler::new(Config::default());
        let project = assembler.load(&path).unwrap();
        let report = build_report(assembler.database(), project, path).unwrap();

        assert_eq!(report.name.as_deref(), Some("parkcity"));
        assert_eq!(report.options.len(), 9);
        assert_eq!(report.options[0].card, "WATERSHED_MASK");
        assert_eq!(
            report.sub_files,
            vec!["PRECIP_FILE", "PROJECTION_FILE", "MAPPING_TABLE"]
        );

        let event = &report.events[0];
        assert_eq!(event.description, "Storm1");
        assert_eq!(event.gages, vec!["GageA", "GageB"]);
        assert_eq!(event.periods, 1);
        assert_eq!(event.value_types, vec!["RAD"]);
        assert_eq!(event.first, event.last);
    }

    #[tokio::test]
    async fn test_inspect_json() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path());

        let args = InspectArgs {
            project: dir.path().to_path_buf(),
            output_format: OutputFormat::Json,
            lenient_periods: false,
        };
        let stats = run_inspect(args, Config::default()).await.unwrap();
        assert_eq!(stats.files_read, 4);
        assert_eq!(stats.events, 1);
    }
}
