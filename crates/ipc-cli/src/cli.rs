//! CLI argument definitions for the IPC pipeline.

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ipc-pipeline",
    version,
    about = "Reshape the IPC acute food insecurity feed into flat CSV exports",
    long_about = "Reads the IPC/CH classification feed per country and writes long and wide\n\
                  CSV exports at national, level 1, and area granularity, plus a harmonized\n\
                  cross-country table with administrative pcode matching."
)]
pub struct Cli {
    /// Directory artifacts are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Pipeline configuration file.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = "config/pipeline.toml"
    )]
    pub config: PathBuf,

    /// Watermark state file carried between runs.
    #[arg(
        long = "state-file",
        value_name = "PATH",
        default_value = "analysis_dates.txt"
    )]
    pub state_file: PathBuf,

    /// Directory downloaded responses are saved in.
    #[arg(long = "saved-dir", value_name = "DIR", default_value = "saved_data")]
    pub saved_dir: PathBuf,

    /// Save downloaded data for later offline runs.
    #[arg(long = "save")]
    pub save: bool,

    /// Read from the saved-data directory instead of the network.
    #[arg(long = "use-saved")]
    pub use_saved: bool,

    /// Process only the given ISO3 codes (repeatable).
    #[arg(long = "country", value_name = "ISO3")]
    pub countries: Vec<String>,

    /// Skip the harmonized global export stage.
    #[arg(long = "skip-hapi")]
    pub skip_hapi: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}
