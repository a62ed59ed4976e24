//! Precip command: round-trip a standalone precipitation file

use super::shared::{CommandStats, create_spinner};
use crate::app::context::{ReadContext, WriteContext};
use crate::app::models::Event;
use crate::app::services::precip_file::{read_precip_file, write_precip_file};
use crate::app::store::{Database, EntityStore};
use crate::cli::args::PrecipArgs;
use crate::config::Config;
use anyhow::Context;
use colored::*;
use std::time::Instant;
use tracing::info;

/// Read `args.input` and write its rendered form to `args.output`
pub async fn run_precip(
    args: PrecipArgs,
    config: Config,
    show_progress: bool,
) -> anyhow::Result<CommandStats> {
    let start_time = Instant::now();
    args.validate()?;

    let spinner = create_spinner(&format!("Reading {}", args.input.display()), show_progress);
    let (input, output) = (args.input.clone(), args.output.clone());

    let outcome = tokio::task::spawn_blocking(move || -> crate::Result<_> {
        let mut db = Database::new();
        let mut uow = db.begin();
        let file = read_precip_file(&mut ReadContext::new(&mut uow, &config), &input)?;
        uow.commit()?;

        write_precip_file(WriteContext::new(&db, &config), file, &output)?;
        Ok((db.all::<Event>().len(), db.entity_count()))
    })
    .await
    .context("Precipitation task panicked")?;
    spinner.finish_and_clear();

    let (events, entities) =
        outcome.with_context(|| format!("Failed to round-trip {}", args.input.display()))?;
    info!("Wrote {} events to {}", events, args.output.display());

    let stats = CommandStats {
        files_read: 1,
        files_written: 1,
        events,
        entities,
        processing_time: start_time.elapsed(),
    };

    if show_progress {
        println!("{} {}", "Wrote".green().bold(), args.output.display());
        println!("{}", stats.summary().dimmed());
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::precip_file::tests::MULTI_EVENT;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_precip_rewrites_file_verbatim() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("storms.gag");
        let output = dir.path().join("out.gag");
        std::fs::write(&input, MULTI_EVENT).unwrap();

        let args = PrecipArgs {
            input,
            output: output.clone(),
            lenient_periods: false,
        };
        let stats = run_precip(args, Config::default(), false).await.unwrap();

        assert_eq!(stats.events, 2);
        assert_eq!(std::fs::read_to_string(output).unwrap(), MULTI_EVENT);
    }

    #[tokio::test]
    async fn test_precip_period_mismatch_honours_lenient_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("short.gag");
        let output = dir.path().join("out.gag");
        std::fs::write(
            &input,
            "EVENT \"Short\"\nNRGAG 1\nNRPDS 3\nCOORD 1.0 2.0 \"G\"\nGAGES 2017 01 01 00 00 0.10\n",
        )
        .unwrap();

        let args = PrecipArgs {
            input,
            output: output.clone(),
            lenient_periods: true,
        };

        let strict = run_precip(args.clone(), Config::default(), false).await;
        assert!(format!("{:#}", strict.unwrap_err()).contains("short.gag"));
        assert!(!output.exists());

        let lenient = Config::default().with_lenient_periods();
        let stats = run_precip(args, lenient, false).await.unwrap();
        assert_eq!(stats.events, 1);
        assert!(output.exists());
    }
}
