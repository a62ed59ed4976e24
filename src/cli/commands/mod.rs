//! Command implementations for the GSSHA I/O CLI
//!
//! Each subcommand lives in its own module. The heavy lifting (reading and
//! writing model files) is blocking file I/O, so commands hand it to
//! `spawn_blocking` and keep the async runtime free for signal handling.

pub mod cards;
pub mod inspect;
pub mod precip;
pub mod roundtrip;
pub mod shared;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use shared::{load_configuration, setup_logging};
use tracing::debug;

/// Main command runner
///
/// Loads the layered configuration, sets up logging and dispatches to the
/// subcommand handler.
pub async fn run(args: Args) -> anyhow::Result<CommandStats> {
    args.validate()?;
    let config = load_configuration(&args)?;
    setup_logging(&config)?;
    debug!("Arguments: {:?}", args);

    let show_progress = args.show_progress();
    match args.command {
        Some(Commands::Roundtrip(rt)) => roundtrip::run_roundtrip(rt, config, show_progress).await,
        Some(Commands::Inspect(inspect)) => inspect::run_inspect(inspect, config).await,
        Some(Commands::Precip(precip)) => precip::run_precip(precip, config, show_progress).await,
        Some(Commands::Cards(cards)) => cards::run_cards(cards),
        None => anyhow::bail!("No command given; run with --help for usage"),
    }
}
