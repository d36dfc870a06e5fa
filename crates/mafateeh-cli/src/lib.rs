pub mod cli;
pub mod commands;
mod simulator;

use clap::Parser;
use cli::Mafateeh;
use commands::handle_command;
use mafateeh_core::LOG_ENV;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Log to stderr so command output on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the mafateeh CLI application
pub fn run_main() {
    init_logging();

    let args = Mafateeh::parse();
    let result = handle_command(args);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
