use clap::{CommandFactory, Parser};
use gssha_io::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // A read or write in progress is abandoned on CTRL+C; atomic writes
        // leave no partial files behind.
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, shutting down...");
                    Err(anyhow::anyhow!("Interrupted by user"))
                }
                Err(e) => Err(anyhow::Error::new(e).context("Failed to listen for CTRL+C")),
            },
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("GSSHA I/O - hydrology model file reader and writer");
    println!("==================================================");
    println!();
    println!("EXAMPLES:");
    println!("    # Copy a project and its sub-files under a new name:");
    println!("    gssha-io roundtrip ./parkcity --output ./out --name parkcity_v2");
    println!();
    println!("    # Show the options and precipitation events of a project:");
    println!("    gssha-io inspect ./parkcity/parkcity.prj --format json");
    println!();
    println!("    # List the PATH cards of the project vocabulary:");
    println!("    gssha-io cards --type PATH");
    println!();
    if let Err(e) = Args::command().print_help() {
        eprintln!("Failed to print help: {}", e);
    }
}
