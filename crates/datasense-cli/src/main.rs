//! DataSense CLI - load, score, fix and join tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log to stderr at `warn`, or `debug` with `--verbose`. `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},datasense={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            file,
            json,
            delimiter,
            no_typing,
            max_rows,
        } => commands::inspect::run(file, json, delimiter, no_typing, max_rows, cli.verbose),

        Commands::Clean {
            file,
            missing,
            constant,
            output,
            format,
        } => commands::clean::run(file, missing, constant, output, format),

        Commands::Join {
            left,
            right,
            left_field,
            right_field,
            relationship_type,
            output,
            format,
        } => commands::join::run(
            left,
            right,
            left_field,
            right_field,
            relationship_type,
            output,
            format,
        ),

        Commands::Export { file, output } => commands::export::run(file, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
