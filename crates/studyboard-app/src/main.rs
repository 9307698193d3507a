//! Main application entry point.

use clap::Parser;
use studyboard_app::args::{Cli, Commands};
use studyboard_app::{AppError, ReplayOptions, inspect, replay};

fn main() {
    env_logger::init();
    log::info!("Starting StudyBoard");

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            config,
            out,
            name,
            pretty,
        } => {
            let report = replay(&ReplayOptions {
                script,
                config,
                out,
                name,
                pretty,
            })?;
            log::info!(
                "Replayed {} steps ({} changes)",
                report.steps,
                report.changes
            );
            println!("{}", report.location);
        }
        Commands::Inspect { document } => {
            println!("{}", inspect(&document)?);
        }
    }
    Ok(())
}
