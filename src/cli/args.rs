//! Command-line argument definitions for the GSSHA I/O tool
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Verbosity, quiet mode and the config file are global flags shared by all
//! subcommands.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GSSHA model file tool
///
/// Reads GSSHA project and precipitation files into the normalized entity
/// model and writes them back out.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gssha-io",
    version,
    about = "Read, inspect and rewrite GSSHA hydrology model files",
    long_about = "Reads GSSHA project files together with the precipitation, projection and \
                  mapping table files they reference, validates their structure, and writes \
                  them back out with exact formatting. A project loads as a single unit of \
                  work: a malformed sub-file aborts the whole load."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file for output formatting and read strictness.
    /// If not specified, looks for <config dir>/gssha-io/config.toml
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Read a project with all sub-files and write it out under a new name
    Roundtrip(RoundtripArgs),
    /// Read a project and report its options and precipitation events
    Inspect(InspectArgs),
    /// Round-trip a standalone precipitation file
    Precip(PrecipArgs),
    /// List the registered project cards
    Cards(CardsArgs),
}

/// Arguments for the roundtrip command
#[derive(Debug, Clone, Parser)]
pub struct RoundtripArgs {
    /// Project file, or a directory holding exactly one `.prj` file
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Directory to write the project into
    ///
    /// Will be created if it doesn't exist.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory to write the project into"
    )]
    pub output_dir: PathBuf,

    /// Name for the written project
    ///
    /// Sub-files are renamed to match (`<name>.gag`, `<name>_prj.pro`, ...).
    /// Defaults to the input project's name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Accept events whose timestamp count differs from NRPDS
    #[arg(long = "lenient-periods")]
    pub lenient_periods: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Project file, or a directory holding exactly one `.prj` file
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Accept events whose timestamp count differs from NRPDS
    #[arg(long = "lenient-periods")]
    pub lenient_periods: bool,
}

/// Arguments for the precip command
#[derive(Debug, Clone, Parser)]
pub struct PrecipArgs {
    /// Precipitation (`.gag`) file to read
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// File to write the rendered precipitation file to
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Accept events whose timestamp count differs from NRPDS
    #[arg(long = "lenient-periods")]
    pub lenient_periods: bool,
}

/// Arguments for the cards command
#[derive(Debug, Clone, Parser)]
pub struct CardsArgs {
    /// Output format for the card listing
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Only list cards whose value type matches (e.g. PATH)
    #[arg(long = "type", value_name = "TYPE")]
    pub value_type: Option<String>,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }

    /// Get log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether to show progress spinners
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate global arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Whether the active command asked for lenient period checking
    pub fn lenient_periods(&self) -> bool {
        match &self.command {
            Some(Commands::Roundtrip(args)) => args.lenient_periods,
            Some(Commands::Inspect(args)) => args.lenient_periods,
            Some(Commands::Precip(args)) => args.lenient_periods,
            Some(Commands::Cards(_)) | None => false,
        }
    }
}

impl RoundtripArgs {
    /// Validate the roundtrip command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.project.exists() {
            return Err(Error::configuration(format!(
                "Project path does not exist: {}",
                self.project.display()
            )));
        }

        if let Some(name) = &self.name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(Error::configuration(format!(
                    "Invalid project name '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}

impl PrecipArgs {
    /// Validate the precip command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Precipitation file does not exist: {}",
                self.input.display()
            )));
        }

        if self.input == self.output {
            return Err(Error::configuration(
                "Output file must differ from the input file",
            ));
        }

        Ok(())
    }
}
