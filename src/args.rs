use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detects tennis strokes in IMU recordings.")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one CSV recording
    Analyze {
        file: PathBuf,
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        window_len: Option<usize>,
        #[arg(long)]
        min_gap: Option<usize>,
        #[arg(long)]
        sampling_rate: Option<f64>,
        /// Include the extracted windows in the JSON result
        #[arg(long)]
        windows: bool,
        /// Write each stroke window as CSV into this directory
        #[arg(long)]
        export_windows: Option<PathBuf>,
        /// Write the JSON result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Analyze a JSON request body (`-` reads stdin)
    Request {
        input: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Analyze every CSV recording in a directory
    Batch {
        dir: PathBuf,
        #[arg(long)]
        workers: Option<usize>,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default configuration to a file
    Init { path: PathBuf },
}
