use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "studyboard", bin_name = "studyboard", version)]
#[command(about = "Replay whiteboard sessions and inspect exported boards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON script of board operations and save the resulting document
    Replay {
        /// Script file: a JSON array of steps
        script: PathBuf,

        /// Board configuration file (JSON); defaults apply when missing
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to the platform data directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// File name for the export (defaults to a timestamped name)
        #[arg(short, long)]
        name: Option<String>,

        /// Pretty-print the exported JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Decode an exported board and print a summary
    Inspect {
        /// Exported board document
        document: PathBuf,
    },
}
