use clap::Parser;
use tracing_subscriber::EnvFilter;

use drive_torque_calc::cli::Cli;
use drive_torque_calc::runtime::{self, Outcome};

fn main() {
    // Setup logging (set RUST_LOG=info or debug), on stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match runtime::run(&cli) {
        Ok(Outcome::Calculated) => {}
        Ok(Outcome::Rejected) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
